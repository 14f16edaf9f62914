use std::io::{self, BufRead, Write};

use anyhow::Result;

/// Windows longer than this prompt for confirmation before running.
const CONFIRM_THRESHOLD: u32 = 90;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DaysInput {
    NotANumber,
    NotPositive,
    NeedsConfirmation(u32),
    Accepted(u32),
}

pub fn parse_days_input(line: &str) -> DaysInput {
    match line.trim().parse::<i64>() {
        Err(_) => DaysInput::NotANumber,
        Ok(n) if n < 1 => DaysInput::NotPositive,
        Ok(n) if n > i64::from(CONFIRM_THRESHOLD) => DaysInput::NeedsConfirmation(n as u32),
        Ok(n) => DaysInput::Accepted(n as u32),
    }
}

pub fn confirm_accepted(line: &str) -> bool {
    line.trim().eq_ignore_ascii_case("yes")
}

/// Interactive look-back prompt; loops until a usable day count is entered.
pub fn prompt_days() -> Result<u32> {
    let stdin = io::stdin();
    loop {
        print!("Enter the number of days to look back (ending at yesterday): ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            anyhow::bail!("stdin closed before a day count was entered");
        }

        match parse_days_input(&line) {
            DaysInput::NotANumber => println!("Please enter a valid number."),
            DaysInput::NotPositive => println!("Please enter a positive number."),
            DaysInput::NeedsConfirmation(days) => {
                println!("Warning: Requesting more than {} days may take a long time.", CONFIRM_THRESHOLD);
                print!("Do you want to continue? (yes/no): ");
                io::stdout().flush()?;

                let mut confirm = String::new();
                if stdin.lock().read_line(&mut confirm)? == 0 {
                    anyhow::bail!("stdin closed before a day count was entered");
                }
                if confirm_accepted(&confirm) {
                    return Ok(days);
                }
            }
            DaysInput::Accepted(days) => return Ok(days),
        }
    }
}
