//! Unit-suffixed string parsing and temperature conversion.

use lcore_ingest::round_to;
use lcore_standards::UnitRule;
use regex::Regex;

/// Parses strings like `"-75 dBm"` or `"100 Kbps"` into the target unit.
#[derive(Debug, Clone)]
pub struct UnitParser {
    units: Vec<(Regex, f64)>,
}

impl UnitParser {
    pub fn new(rules: &[UnitRule]) -> Result<Self, regex::Error> {
        let units = rules
            .iter()
            .map(|rule| {
                let pattern = format!(
                    r"(?i)^\s*([-+]?\d+(?:\.\d+)?)\s*{}\s*$",
                    regex::escape(rule.suffix.trim())
                );
                Regex::new(&pattern).map(|regex| (regex, rule.factor))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { units })
    }

    /// Returns the value converted to the target unit, or `None` when no
    /// configured suffix matches.
    pub fn parse(&self, value: &str) -> Option<f64> {
        self.units.iter().find_map(|(regex, factor)| {
            regex
                .captures(value)
                .and_then(|captures| captures.get(1))
                .and_then(|number| number.as_str().parse::<f64>().ok())
                .map(|number| number * factor)
        })
    }
}

/// `C = (F - 32) * 5 / 9`, rounded to `decimals` places.
pub fn fahrenheit_to_celsius(fahrenheit: f64, decimals: u32) -> f64 {
    round_to((fahrenheit - 32.0) * 5.0 / 9.0, decimals)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(suffix: &str, factor: f64) -> UnitRule {
        UnitRule {
            suffix: suffix.to_string(),
            factor,
        }
    }

    #[test]
    fn parses_signal_and_latency() {
        let dbm = UnitParser::new(&[rule("dBm", 1.0)]).unwrap();
        assert_eq!(dbm.parse("-75 dBm"), Some(-75.0));
        assert_eq!(dbm.parse("-80dBm"), Some(-80.0));
        assert_eq!(dbm.parse("n/a"), None);
        assert_eq!(dbm.parse("-75"), None);

        let ms = UnitParser::new(&[rule("ms", 1.0)]).unwrap();
        assert_eq!(ms.parse("30 ms"), Some(30.0));
    }

    #[test]
    fn converts_kbps_to_mbps() {
        let bandwidth = UnitParser::new(&[rule("Mbps", 1.0), rule("Kbps", 0.001)]).unwrap();
        assert_eq!(bandwidth.parse("10 Mbps"), Some(10.0));
        assert_eq!(bandwidth.parse("100 Kbps"), Some(0.1));
        assert_eq!(bandwidth.parse("1.5 Gbps"), None);
    }

    #[test]
    fn parses_percentages() {
        let percent = UnitParser::new(&[rule("%", 1.0)]).unwrap();
        assert_eq!(percent.parse("70%"), Some(70.0));
        assert_eq!(percent.parse("70"), None);
    }

    #[test]
    fn fahrenheit_reference_points() {
        assert_eq!(fahrenheit_to_celsius(32.0, 1), 0.0);
        assert_eq!(fahrenheit_to_celsius(212.0, 1), 100.0);
        assert_eq!(fahrenheit_to_celsius(68.0, 1), 20.0);
        assert_eq!(fahrenheit_to_celsius(0.0, 1), -17.8);
    }
}
