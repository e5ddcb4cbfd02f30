use crate::code::Code;
use crate::config::Configuration;

/// Enumerates every code the configuration admits, in lexicographic order.
///
/// Returns an empty vector when no complete code exists, e.g. more positions than distinct
/// digits with duplicates disallowed.
#[must_use]
pub fn generate_candidates(config: &Configuration) -> Vec<Code> {
    let mut candidates = Vec::new();
    if config.code_length == 0 || config.digit_min > config.digit_max {
        return candidates;
    }
    if !config.allow_duplicates && config.code_length > config.alphabet_size() {
        return candidates;
    }
    let expected = usize::try_from(config.universe_size()).unwrap_or(usize::MAX);
    candidates.reserve(expected.min(1 << 20));
    let mut current = Vec::with_capacity(config.code_length);
    extend(config, &mut current, &mut candidates);
    candidates
}

fn extend(config: &Configuration, current: &mut Vec<u8>, out: &mut Vec<Code>) {
    if current.len() == config.code_length {
        out.push(Code::new(current.clone()));
        return;
    }
    for digit in config.digit_min..=config.digit_max {
        if !config.allow_duplicates && current.contains(&digit) {
            continue;
        }
        current.push(digit);
        extend(config, current, out);
        current.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(code_length: usize, digit_min: u8, digit_max: u8, allow_duplicates: bool) -> Configuration {
        Configuration {
            code_length,
            digit_min,
            digit_max,
            allow_duplicates,
        }
    }

    #[test]
    fn test_default_universe() {
        let candidates = generate_candidates(&Configuration::default());
        assert_eq!(candidates.len(), 3024);
        assert_eq!(candidates[0].to_string(), "1234");
        assert_eq!(candidates[1].to_string(), "1235");
        assert_eq!(candidates.last().unwrap().to_string(), "9876");
    }

    #[test]
    fn test_sizes_match_closed_form() {
        for length in 1..=4 {
            for (min, max) in [(0, 9), (1, 6), (3, 3), (2, 5)] {
                for duplicates in [false, true] {
                    let config = config(length, min, max, duplicates);
                    assert_eq!(
                        generate_candidates(&config).len() as u128,
                        config.universe_size(),
                        "{config:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_with_duplicates() {
        let candidates = generate_candidates(&config(2, 1, 2, true));
        let rendered: Vec<String> = candidates.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, vec!["11", "12", "21", "22"]);
    }

    #[test]
    fn test_without_duplicates_all_distinct() {
        let candidates = generate_candidates(&config(3, 0, 4, false));
        assert_eq!(candidates.len(), 5 * 4 * 3);
        for code in &candidates {
            let mut digits = code.digits().to_vec();
            digits.sort_unstable();
            digits.dedup();
            assert_eq!(digits.len(), 3, "{code}");
        }
    }

    #[test]
    fn test_order_is_lexicographic_and_stable() {
        let config = config(3, 0, 5, true);
        let first = generate_candidates(&config);
        let second = generate_candidates(&config);
        assert_eq!(first, second);
        assert!(first.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_impossible_configuration_is_empty() {
        assert!(generate_candidates(&config(4, 1, 3, false)).is_empty());
        assert!(generate_candidates(&config(11, 0, 9, false)).is_empty());
        assert!(generate_candidates(&config(0, 0, 9, true)).is_empty());
    }

    #[test]
    fn test_single_digit_alphabet() {
        let candidates = generate_candidates(&config(3, 7, 7, true));
        assert_eq!(candidates, vec![Code::new(vec![7, 7, 7])]);
        assert_eq!(generate_candidates(&config(1, 7, 7, false)).len(), 1);
    }
}
