//! Interactive console prompts.
//!
//! Both prompts keep asking until they get a valid answer; bad input is
//! answered with a hint and never ends the run. They read from any
//! [`BufRead`] and write to any [`Write`], so they work against stdin and
//! stdout as well as in-memory buffers.
//!
//! # Example
//!
//! ```no_run
//! use std::io;
//!
//! let videos = framegrab::list_videos("video")?;
//! let mut input = io::stdin().lock();
//! let mut output = io::stdout();
//! let chosen = framegrab::prompt::select_video(&mut input, &mut output, &videos)?;
//! let count = framegrab::prompt::frame_count(&mut input, &mut output)?;
//! # Ok::<(), framegrab::FrameGrabError>(())
//! ```

use std::{
    io::{BufRead, Write},
    path::{Path, PathBuf},
};

use crate::{catalog, error::FrameGrabError};

const INVALID_NUMBER: &str = "Please enter a valid number.";

/// Print a numbered menu of `videos` and return the one the user picks.
///
/// `videos` must not be empty.
///
/// # Errors
///
/// [`FrameGrabError::InputClosed`] if input ends first, or an I/O error.
pub fn select_video<R, W>(
    input: &mut R,
    output: &mut W,
    videos: &[PathBuf],
) -> Result<PathBuf, FrameGrabError>
where
    R: BufRead,
    W: Write,
{
    writeln!(output, "\nAvailable videos:")?;
    for (number, video) in (1..).zip(videos) {
        writeln!(output, "{number}. {}", catalog::display_name(video))?;
    }

    loop {
        let answer = ask(input, output, "\nSelect video number: ")?;
        match answer.parse::<i64>() {
            Ok(number) => match usize::try_from(number)
                .ok()
                .and_then(|number| number.checked_sub(1))
                .and_then(|index| videos.get(index))
            {
                Some(video) => return Ok(video.clone()),
                None => writeln!(output, "Invalid selection. Please try again.")?,
            },
            Err(_) => writeln!(output, "{INVALID_NUMBER}")?,
        }
    }
}

/// Ask how many frames to extract until a positive integer is given.
///
/// # Errors
///
/// [`FrameGrabError::InputClosed`] if input ends first, or an I/O error.
pub fn frame_count<R, W>(input: &mut R, output: &mut W) -> Result<u64, FrameGrabError>
where
    R: BufRead,
    W: Write,
{
    loop {
        let answer = ask(input, output, "\nHow many frames do you want to extract? ")?;
        match answer.parse::<i64>() {
            Ok(count) if count > 0 => return Ok(count as u64),
            Ok(_) => writeln!(output, "Please enter a positive number.")?,
            Err(_) => writeln!(output, "{INVALID_NUMBER}")?,
        }
    }
}

/// Print `question` and read one trimmed line.
fn ask<R, W>(input: &mut R, output: &mut W, question: &str) -> Result<String, FrameGrabError>
where
    R: BufRead,
    W: Write,
{
    write!(output, "{question}")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(FrameGrabError::InputClosed);
    }
    Ok(line.trim().to_string())
}

/// Line announcing which video is about to be processed.
pub fn processing_banner(video: &Path) -> String {
    format!("\nProcessing video: {}", catalog::display_name(video))
}
