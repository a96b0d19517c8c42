//! Runs one encode or decode from a resolved configuration

use std::io::{self, Write};

use zeroize::Zeroizing;

use crate::config::{check_output_path, OutputSink, RunConfig};
use crate::error::{SealError, SealResult};
use crate::pipeline::{Direction, EnvelopePipeline};
use crate::storage::{write_bytes_atomic, KeyReusePrompt, KeyStore};

use super::prompt::prompt_for;

/// Handle a run, asking on the terminal if the key policy says so
pub fn handle_run(config: &RunConfig) -> SealResult<()> {
    let mut prompt = prompt_for(config.key_policy);
    let stdout = io::stdout();
    handle_run_with(config, &mut *prompt, &mut stdout.lock())
}

/// Handle a run with an injected prompt and stdout
///
/// The output destination is checked before the key is touched, and nothing
/// is written unless every pipeline step succeeds.
pub fn handle_run_with<P, W>(config: &RunConfig, prompt: &mut P, stdout: &mut W) -> SealResult<()>
where
    P: KeyReusePrompt + ?Sized,
    W: Write,
{
    if let OutputSink::File(path) = &config.output {
        check_output_path(path, &config.input, config.force)?;
    }

    let store = KeyStore::new(&config.key_file);
    let pipeline = EnvelopePipeline::from_store(&store, prompt)?;

    let input = Zeroizing::new(config.read_input()?);
    let output = pipeline.run(config.request(&input))?;

    match &config.output {
        OutputSink::Stdout => {
            stdout.write_all(output.bytes())?;
            if output.is_text() {
                writeln!(stdout)?;
            }
            stdout.flush()?;
        }
        OutputSink::File(path) => {
            let written = if output.is_text() {
                let mut text = output.bytes().to_vec();
                text.push(b'\n');
                write_bytes_atomic(path, &text)
            } else {
                write_bytes_atomic(path, output.bytes())
            };
            written.map_err(|e| {
                SealError::Io(format!("Failed to write {}: {}", path.display(), e))
            })?;

            let label = match config.direction {
                Direction::Encode => "Encrypted",
                Direction::Decode => "Decrypted",
            };
            tracing::info!(path = %path.display(), bytes = output.bytes().len(), "wrote output");
            writeln!(stdout, "{} file saved to: {}", label, path.display())?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{InputSource, KeyPolicy};
    use crate::encoding::TextEncoding;
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    fn config(dir: &TempDir, direction: Direction, input: InputSource, output: OutputSink) -> RunConfig {
        RunConfig {
            direction,
            input,
            output,
            encoding: TextEncoding::Base64,
            text_files: false,
            key_file: dir.path().join("key.bin"),
            key_policy: KeyPolicy::Reuse,
            force: false,
        }
    }

    fn run(cfg: &RunConfig) -> SealResult<String> {
        let mut out = Vec::new();
        handle_run_with(cfg, &mut |_: &Path| true, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_file_roundtrip() {
        let dir = TempDir::new().unwrap();
        let plain = dir.path().join("notes.txt");
        fs::write(&plain, b"line one\nline two\n").unwrap();

        let sealed = dir.path().join("notes.txt.bin");
        let shown = run(&config(
            &dir,
            Direction::Encode,
            InputSource::File(plain.clone()),
            OutputSink::File(sealed.clone()),
        ))
        .unwrap();
        assert!(shown.contains("Encrypted file saved to:"));

        let opened = dir.path().join("notes.txt.dec");
        let shown = run(&config(
            &dir,
            Direction::Decode,
            InputSource::File(sealed),
            OutputSink::File(opened.clone()),
        ))
        .unwrap();
        assert!(shown.contains("Decrypted file saved to:"));
        assert_eq!(fs::read(&opened).unwrap(), b"line one\nline two\n");
    }

    #[test]
    fn test_stdout_text_roundtrip() {
        let dir = TempDir::new().unwrap();

        let armored = run(&config(
            &dir,
            Direction::Encode,
            InputSource::Literal("hello world".into()),
            OutputSink::Stdout,
        ))
        .unwrap();
        assert!(armored.ends_with('\n'));

        let plain = run(&config(
            &dir,
            Direction::Decode,
            InputSource::Literal(armored),
            OutputSink::Stdout,
        ))
        .unwrap();
        assert_eq!(plain, "hello world");
    }

    #[test]
    fn test_existing_output_not_clobbered() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("input.bin");
        fs::write(&out, b"unrelated").unwrap();

        let result = run(&config(
            &dir,
            Direction::Encode,
            InputSource::Literal("x".into()),
            OutputSink::File(out.clone()),
        ));
        assert!(matches!(result, Err(SealError::Config(_))));
        assert_eq!(fs::read(&out).unwrap(), b"unrelated");
        // Rejected before any key was created
        assert!(!dir.path().join("key.bin").exists());
    }

    #[test]
    fn test_failed_decode_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let bogus = dir.path().join("bogus.bin");
        fs::write(&bogus, vec![0u8; 64]).unwrap();
        let out: PathBuf = dir.path().join("bogus.dec");

        let result = run(&config(
            &dir,
            Direction::Decode,
            InputSource::File(bogus),
            OutputSink::File(out.clone()),
        ));
        assert!(matches!(result, Err(SealError::Authentication)));
        assert!(!out.exists());
    }

    #[test]
    fn test_text_file_channel() {
        let dir = TempDir::new().unwrap();
        let armored_path = dir.path().join("secret.txt");

        let mut enc = config(
            &dir,
            Direction::Encode,
            InputSource::Literal("armored in a file".into()),
            OutputSink::File(armored_path.clone()),
        );
        enc.text_files = true;
        enc.encoding = TextEncoding::Hex;
        run(&enc).unwrap();

        let text = fs::read_to_string(&armored_path).unwrap();
        assert!(text.trim_end().chars().all(|c| c.is_ascii_hexdigit()));

        let mut dec = config(
            &dir,
            Direction::Decode,
            InputSource::File(armored_path),
            OutputSink::Stdout,
        );
        dec.text_files = true;
        dec.encoding = TextEncoding::Hex;
        assert_eq!(run(&dec).unwrap(), "armored in a file");
    }
}
