use std::io::Write;

use anyhow::Result;
use tracing::info;

use crate::cli::{DivideArgs, FibonacciArgs, PartsArgs, PrimesArgs, SumArgs};
use crate::runtime::Lab;
use crate::teasers;

/// Execute the divide command.
pub fn divide<W: Write>(args: DivideArgs, lab: &mut Lab<W>) -> Result<()> {
    let DivideArgs { a, b } = args;
    lab.run_void(call!(teasers::divide_numbers(a = a, b = b)));
    Ok(())
}

/// Execute the fibonacci command.
pub fn fibonacci<W: Write>(args: FibonacciArgs, lab: &mut Lab<W>) -> Result<()> {
    let sequence = lab.run(call!(teasers::fibonacci_sequence(count = args.count)));
    if let Some(sequence) = sequence {
        info!("Listed {} Fibonacci numbers", sequence.len());
    }
    Ok(())
}

/// Execute the primes command.
pub fn primes<W: Write>(args: PrimesArgs, lab: &mut Lab<W>) -> Result<()> {
    let checked = lab.run(call!(teasers::check_primes(numbers = args.numbers)));
    if let Some(checked) = checked {
        let count = checked.iter().filter(|(_, prime)| *prime).count();
        info!("{} of {} numbers are prime", count, checked.len());
    }
    Ok(())
}

/// Execute the parts command.
pub fn parts<W: Write>(args: PartsArgs, lab: &mut Lab<W>) -> Result<()> {
    let parts = lab.run(try_call!(teasers::parse_parts(input = args.input.as_deref())));
    if let Some(parts) = parts {
        info!("Split input into {} parts", parts.len());
    }
    Ok(())
}

/// Execute the sum command.
pub fn sum<W: Write>(args: SumArgs, lab: &mut Lab<W>) -> Result<()> {
    let total = lab.run(try_call!(teasers::sum_parts(input = args.input.as_str())));
    if let Some(total) = total {
        info!("Sum is {}", total);
    }
    Ok(())
}
