use std::path::PathBuf;

/// Binary probed on PATH for embedded-text recognition
const RECOGNIZER_BINARY: &str = "tesseract";

/// Optional recognition capability backed by an external binary
///
/// The capability is probed once per batch; when the binary is absent the
/// whole batch silently skips recognition.
pub struct Recognizer {
    binary: PathBuf,
}

impl Recognizer {
    /// Look for the recognition binary on PATH
    pub fn probe() -> Option<Self> {
        match which::which(RECOGNIZER_BINARY) {
            Ok(binary) => {
                ::log::debug!("recognition available: {}", binary.display());
                Some(Self { binary })
            }
            Err(_) => {
                ::log::debug!(
                    "{} not found on PATH, skipping recognition",
                    RECOGNIZER_BINARY
                );
                None
            }
        }
    }

    /// Recognize text embedded in raw image bytes
    ///
    /// The bytes are decoded, normalized to RGB, and handed to the binary as
    /// a PNG. Any decode or invocation failure yields `None`, affecting only
    /// the one image being processed.
    pub async fn recognize(&self, data: &[u8]) -> Option<String> {
        let decoded = match image::load_from_memory(data) {
            Ok(decoded) => decoded,
            Err(e) => {
                ::log::debug!("image decode failed: {}", e);
                return None;
            }
        };
        let rgb = image::DynamicImage::ImageRgb8(decoded.to_rgb8());

        let dir = match tempfile::tempdir() {
            Ok(dir) => dir,
            Err(e) => {
                ::log::debug!("temp dir creation failed: {}", e);
                return None;
            }
        };
        let input = dir.path().join("input.png");
        if let Err(e) = rgb.save_with_format(&input, image::ImageFormat::Png) {
            ::log::debug!("temp image write failed: {}", e);
            return None;
        }

        let output = tokio::process::Command::new(&self.binary)
            .arg(&input)
            .arg("stdout")
            .output()
            .await;

        match output {
            Ok(output) if output.status.success() => {
                Some(String::from_utf8_lossy(&output.stdout).trim().to_string())
            }
            Ok(output) => {
                ::log::debug!("recognizer exited with {}", output.status);
                None
            }
            Err(e) => {
                ::log::debug!("recognizer invocation failed: {}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_undecodable_bytes_yield_none() {
        // Decode happens before any binary invocation, so this path needs no
        // recognizer installed
        let recognizer = Recognizer {
            binary: PathBuf::from(RECOGNIZER_BINARY),
        };
        let result = recognizer.recognize(b"definitely not an image").await;
        assert!(result.is_none());
    }

    #[test]
    fn test_probe_is_silent_about_absence() {
        // Whichever way the probe goes on this machine, it must not panic
        let _ = Recognizer::probe();
    }
}
