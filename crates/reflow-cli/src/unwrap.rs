use std::path::PathBuf;

use clap::Args;
use reflow_text::unwrap_paragraphs;

use crate::error::Result;
use crate::io::{read_input, write_output};

#[derive(Debug, Clone, Default, Args)]
pub struct UnwrapArgs {
    /// Input file (stdin when omitted or `-`).
    pub input: Option<PathBuf>,

    /// Keep each paragraph's first-line indentation.
    #[arg(long)]
    pub preserve_indentation: bool,

    /// Write the result to this file.
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

pub fn run_unwrap(args: UnwrapArgs) -> Result<()> {
    let input = read_input(args.input.as_deref())?;
    let merged = unwrap_paragraphs(&input, args.preserve_indentation);
    write_output(args.output.as_deref(), &merged)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn unwraps_file_to_file() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("in.txt");
        let output = dir.path().join("out.txt");
        fs::write(&input, "  first line\n  second line\n\n\nnext").unwrap();

        run_unwrap(UnwrapArgs {
            input: Some(input),
            preserve_indentation: true,
            output: Some(output.clone()),
        })
        .unwrap();

        assert_eq!(
            fs::read_to_string(output).unwrap(),
            "  first line second line\n\n\nnext\n"
        );
    }
}
