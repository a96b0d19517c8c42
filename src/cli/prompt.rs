//! Terminal confirmation for reusing an existing key

use std::io::{self, BufRead, Write};
use std::path::Path;

use crate::config::KeyPolicy;
use crate::storage::KeyReusePrompt;

/// Asks on stderr and reads the answer from stdin
pub struct TerminalPrompt;

impl KeyReusePrompt for TerminalPrompt {
    fn reuse_existing(&mut self, path: &Path) -> bool {
        let stdin = io::stdin();
        let mut stderr = io::stderr();
        ask_reuse(&mut stdin.lock(), &mut stderr, path)
    }
}

/// Ask whether to reuse the key at `path`
///
/// Only `y`/`yes` and a closed input reuse the key; any other answer
/// replaces it.
pub fn ask_reuse<R: BufRead, W: Write>(input: &mut R, out: &mut W, path: &Path) -> bool {
    let _ = write!(
        out,
        "Key exists at {}. Use it? Answering 'n' replaces it and previously sealed data can no longer be opened. (y/n): ",
        path.display()
    );
    let _ = out.flush();

    let mut answer = String::new();
    match input.read_line(&mut answer) {
        Ok(0) => {
            // No terminal to ask; never destroy a key on EOF
            tracing::warn!("no answer on stdin, keeping the existing key");
            true
        }
        Ok(_) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
        Err(e) => {
            tracing::warn!(error = %e, "failed to read answer, keeping the existing key");
            true
        }
    }
}

/// Build the reuse decision for `policy`
pub fn prompt_for(policy: KeyPolicy) -> Box<dyn KeyReusePrompt> {
    match policy {
        KeyPolicy::Ask => Box::new(TerminalPrompt),
        KeyPolicy::Reuse => Box::new(|_: &Path| true),
        KeyPolicy::Regenerate => Box::new(|_: &Path| false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn answer(text: &str) -> (bool, String) {
        let mut input = Cursor::new(text.as_bytes().to_vec());
        let mut out = Vec::new();
        let reuse = ask_reuse(&mut input, &mut out, Path::new("key.bin"));
        (reuse, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_yes_reuses() {
        assert!(answer("y\n").0);
        assert!(answer("Y\n").0);
        assert!(answer("  yes \n").0);
    }

    #[test]
    fn test_other_answers_regenerate() {
        assert!(!answer("n\n").0);
        assert!(!answer("\n").0);
        assert!(!answer("maybe\n").0);
    }

    #[test]
    fn test_eof_keeps_key() {
        assert!(answer("").0);
    }

    #[test]
    fn test_prompt_names_path_and_warns() {
        let (_, shown) = answer("y\n");
        assert!(shown.contains("key.bin"));
        assert!(shown.contains("(y/n)"));
        assert!(shown.contains("can no longer be opened"));
    }

    #[test]
    fn test_policy_prompts() {
        let path = Path::new("key.bin");
        assert!(prompt_for(KeyPolicy::Reuse).reuse_existing(path));
        assert!(!prompt_for(KeyPolicy::Regenerate).reuse_existing(path));
    }
}
