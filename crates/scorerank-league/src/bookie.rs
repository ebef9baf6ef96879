//! Bookmaker odds as a single expected-outcome number.

use crate::record::MatchOdds;

/// Collapse three decimal prices into a value in `[-1, 1]`.
///
/// Implied probabilities are normalized to remove the bookmaker margin, then
/// the away probability is subtracted from the home probability: +1 is a
/// certain home win, -1 a certain away win, 0 a coin toss (or a certain
/// draw).
#[must_use]
pub fn implied_outcome(odds: &MatchOdds) -> f64 {
    let home = odds.home().recip();
    let draw = odds.draw().recip();
    let away = odds.away().recip();
    (home - away) / (home + draw + away)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn odds(h: f64, d: f64, a: f64) -> MatchOdds {
        MatchOdds::new(h, d, a).unwrap()
    }

    #[test]
    fn even_match_is_zero() {
        assert!(implied_outcome(&odds(2.8, 3.2, 2.8)).abs() < 1e-12);
    }

    #[test]
    fn favourite_sign() {
        assert!(implied_outcome(&odds(1.2, 6.0, 15.0)) > 0.5);
        assert!(implied_outcome(&odds(15.0, 6.0, 1.2)) < -0.5);
    }

    #[test]
    fn known_value() {
        // 1/2 - 1/4 over 1/2 + 1/4 + 1/4 = 0.25
        assert!((implied_outcome(&odds(2.0, 4.0, 4.0)) - 0.25).abs() < 1e-12);
    }

    #[test]
    fn stays_within_unit_interval() {
        for &(h, d, a) in &[(1.01, 50.0, 100.0), (100.0, 50.0, 1.01), (1.5, 1.5, 1.5)] {
            let v = implied_outcome(&odds(h, d, a));
            assert!((-1.0..=1.0).contains(&v));
        }
    }
}
