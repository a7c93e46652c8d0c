use std::path::PathBuf;

use tempfile::TempDir;

/// Two valid questions with LF endings.
pub const TWO_VALID: &str = "\
What is 2+2?
A. 3
B. 4
ANSWER: B

Capital of France?
A) Paris
B) Rome
ANSWER: a
";

/// One valid question followed by an answer that names no option.
pub const ONE_VALID_ONE_BAD_KEY: &str = "\
What is 2+2?
A. 3
B. 4
ANSWER: B

Pick one
A. x
B. y
ANSWER: E
";

/// Isolated scratch directory for a single test.
pub struct UnitTestFixture {
    pub temp_dir: TempDir,
    pub data_path: PathBuf,
}

impl UnitTestFixture {
    pub fn new(label: &str) -> Self {
        let temp_dir = tempfile::Builder::new()
            .prefix(&format!("qbank-{label}-"))
            .tempdir()
            .expect("Failed to create temp dir");
        let data_path = temp_dir.path().to_path_buf();
        Self {
            temp_dir,
            data_path,
        }
    }

    /// Write a question bank file.
    pub fn write_bank(&self, relative_path: &str, content: &str) -> PathBuf {
        self.write_bytes(relative_path, content.as_bytes())
    }

    /// Write raw bytes, for encoding edge cases.
    pub fn write_bytes(&self, relative_path: &str, content: &[u8]) -> PathBuf {
        let full_path = self.data_path.join(relative_path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        std::fs::write(&full_path, content).expect("Failed to write file");
        full_path
    }

    /// Write a config file and return its path.
    pub fn write_config(&self, content: &str) -> PathBuf {
        self.write_bank("config.toml", content)
    }
}
