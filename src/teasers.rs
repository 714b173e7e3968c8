//! Small puzzles the `callscope` binary runs through the lab.

use std::num::ParseIntError;

use thiserror::Error;

/// Separator between parts in [`parse_parts`] input.
pub const PART_SEPARATOR: char = ';';

#[derive(Debug, Error)]
pub enum PartsError {
    #[error("Value cannot be missing (parameter 'input')")]
    MissingInput,

    #[error("Input cannot be empty (parameter 'input')")]
    Empty,

    #[error("Part {index} ({part:?}) is not an integer")]
    InvalidPart {
        index: usize,
        part: String,
        #[source]
        source: ParseIntError,
    },
}

/// The `n`th Fibonacci number, by naive recursion.
pub fn fibonacci(n: u32) -> u64 {
    if n <= 1 {
        return u64::from(n);
    }
    fibonacci(n - 1) + fibonacci(n - 2)
}

/// The first `count` Fibonacci numbers.
pub fn fibonacci_sequence(count: u32) -> Vec<u64> {
    (0..count).map(fibonacci).collect()
}

pub fn is_prime(number: u64) -> bool {
    if number < 2 {
        return false;
    }
    if number == 2 {
        return true;
    }
    if number % 2 == 0 {
        return false;
    }
    let mut divisor = 3;
    while divisor <= number / divisor {
        if number % divisor == 0 {
            return false;
        }
        divisor += 2;
    }
    true
}

/// Pair each number with whether it is prime.
pub fn check_primes(numbers: Vec<u64>) -> Vec<(u64, bool)> {
    numbers.into_iter().map(|n| (n, is_prime(n))).collect()
}

/// Print the integer quotient of `a / b`, or why there is none.
pub fn divide_numbers(a: i32, b: i32) {
    println!("Brain Teaser #1: Divide Numbers");
    println!("{}", division_message(a, b));
}

fn division_message(a: i32, b: i32) -> String {
    match a.checked_div(b) {
        Some(quotient) => format!("Solution: {quotient}"),
        None if b == 0 => "Error: attempt to divide by zero".to_owned(),
        None => "Error: attempt to divide with overflow".to_owned(),
    }
}

/// Split `input` on `;`. A missing and an empty input are distinct errors.
pub fn parse_parts(input: Option<&str>) -> Result<Vec<String>, PartsError> {
    match input {
        None => Err(PartsError::MissingInput),
        Some("") => Err(PartsError::Empty),
        Some(input) => Ok(input.split(PART_SEPARATOR).map(str::to_owned).collect()),
    }
}

/// Sum the `;`-separated integers in `input`.
pub fn sum_parts(input: &str) -> Result<i64, PartsError> {
    parse_parts(Some(input))?
        .into_iter()
        .enumerate()
        .map(|(index, part)| match part.trim().parse::<i64>() {
            Ok(value) => Ok(value),
            Err(source) => Err(PartsError::InvalidPart {
                index,
                part,
                source,
            }),
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fibonacci_starts_at_zero() {
        assert_eq!(fibonacci_sequence(10), [0, 1, 1, 2, 3, 5, 8, 13, 21, 34]);
        assert!(fibonacci_sequence(0).is_empty());
    }

    #[test]
    fn primes_from_the_sample_set() {
        let checked = check_primes(vec![2, 3, 4, 17, 25, 29, 100]);
        let primes: Vec<u64> = checked
            .into_iter()
            .filter(|(_, prime)| *prime)
            .map(|(n, _)| n)
            .collect();
        assert_eq!(primes, [2, 3, 17, 29]);
        assert!(!is_prime(0));
        assert!(!is_prime(1));
        assert!(!is_prime(9));
    }

    #[test]
    fn division_messages() {
        assert_eq!(division_message(10, 2), "Solution: 5");
        assert_eq!(division_message(7, 2), "Solution: 3");
        assert_eq!(division_message(1, 0), "Error: attempt to divide by zero");
        assert_eq!(
            division_message(i32::MIN, -1),
            "Error: attempt to divide with overflow"
        );
    }

    #[test]
    fn missing_and_empty_input_differ() {
        assert!(matches!(parse_parts(None), Err(PartsError::MissingInput)));
        assert!(matches!(parse_parts(Some("")), Err(PartsError::Empty)));
        assert_eq!(parse_parts(Some("a;b;;c")).unwrap(), ["a", "b", "", "c"]);
    }

    #[test]
    fn sum_reports_the_bad_part() {
        assert_eq!(sum_parts("1; 2;3").unwrap(), 6);

        let err = sum_parts("1;two;3").unwrap_err();
        match &err {
            PartsError::InvalidPart { index, part, .. } => {
                assert_eq!(*index, 1);
                assert_eq!(part, "two");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(std::error::Error::source(&err).is_some());
    }
}
