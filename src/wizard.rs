//! Interactive channel selection (`--configure`)

use std::io::{BufRead, Write};

use crate::error::Result;
use crate::models::Channel;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Answer {
    Yes,
    No,
    All,
    None,
}

impl Answer {
    fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "yes" => Some(Answer::Yes),
            "" | "no" => Some(Answer::No),
            "all" => Some(Answer::All),
            "none" => Some(Answer::None),
            _ => None,
        }
    }
}

/// Ask, channel by channel, which ones to grab. Returns the selected ids in
/// list order. `all`/`none` answer for every remaining channel; end of input
/// counts as `none`.
pub fn select_channels<R: BufRead, W: Write>(
    channels: &[Channel],
    mut input: R,
    mut output: W,
) -> Result<Vec<String>> {
    let mut selected = Vec::new();
    let mut sticky: Option<Answer> = None;

    writeln!(output, "Select the channels that you want to receive data for.")?;

    for channel in channels {
        let answer = match sticky {
            Some(answer) => answer,
            None => {
                let answer = prompt(channel, &mut input, &mut output)?;
                if matches!(answer, Answer::All | Answer::None) {
                    sticky = Some(answer);
                }
                answer
            }
        };

        // Echo the decision once all/none has been given
        if let Some(answer) = sticky {
            let label = if answer == Answer::All { "yes" } else { "no" };
            writeln!(output, "{} {}", channel.display_name, label)?;
        }

        if matches!(answer, Answer::Yes | Answer::All) {
            selected.push(channel.id.clone());
        }
    }

    Ok(selected)
}

fn prompt<R: BufRead, W: Write>(channel: &Channel, input: &mut R, output: &mut W) -> Result<Answer> {
    loop {
        write!(output, "{} [yes,no,all,none (default=no)] ", channel.display_name)?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(Answer::None);
        }

        match Answer::parse(&line) {
            Some(answer) => return Ok(answer),
            None => writeln!(output, "invalid response, please choose one of yes,no,all,none\n")?,
        }
    }
}
