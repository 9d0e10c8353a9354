use crate::{
    context::{TestContext, GENERATOR_FILE_NAME, ROSTER_FILE_NAME, RULES_FILE_NAME},
    error::TestError,
    generator::FakeGenerator,
};

/// Builder for creating test contexts with customizable fixture files.
///
/// Provides a fluent interface for configuring test environments inside a
/// temporary directory. Add fixture files and a fake generator, then call
/// `build()` to write everything to disk.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::{builder::TestBuilder, generator::FakeGenerator};
///
/// let test = TestBuilder::new()
///     .with_rule_counter(3)
///     .with_generator(FakeGenerator::Succeeds("hello".to_string()))
///     .build()?;
/// ```
#[derive(Default)]
pub struct TestBuilder {
    /// Files to write during `build()`, as (relative name, contents) pairs.
    ///
    /// Files are written in the order they were added; later entries with the
    /// same name overwrite earlier ones.
    files: Vec<(String, String)>,

    /// Fake generator script to install, if any.
    generator: Option<FakeGenerator>,
}

impl TestBuilder {
    /// Creates a new test builder with no fixture files configured.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an arbitrary fixture file.
    ///
    /// # Arguments
    /// - `name` - File name relative to the test directory
    /// - `contents` - File contents
    pub fn with_file(mut self, name: &str, contents: &str) -> Self {
        self.files.push((name.to_string(), contents.to_string()));
        self
    }

    /// Seeds the rule counter file with `last_rule_number`.
    pub fn with_rule_counter(self, last_rule_number: u64) -> Self {
        let contents = serde_json::json!({ "last_rule_number": last_rule_number }).to_string();
        self.with_file(RULES_FILE_NAME, &contents)
    }

    /// Writes a roster file with one line per entry.
    pub fn with_roster(self, lines: &[&str]) -> Self {
        let mut contents = lines.join("\n");
        contents.push('\n');
        self.with_file(ROSTER_FILE_NAME, &contents)
    }

    /// Installs a fake generator script.
    ///
    /// The launch command is available afterwards through
    /// `TestContext::generator_command()`.
    pub fn with_generator(mut self, generator: FakeGenerator) -> Self {
        self.generator = Some(generator);
        self
    }

    /// Builds the test context and writes all configured files.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Fully initialized test context
    /// - `Err(TestError::Io)` - Failed to create the directory or write a file
    pub fn build(self) -> Result<TestContext, TestError> {
        let mut context = TestContext::new()?;

        for (name, contents) in &self.files {
            context.write_file(name, contents)?;
        }

        if let Some(generator) = self.generator {
            let script = generator.script(context.dir());
            let path = context.write_file(GENERATOR_FILE_NAME, &script)?;
            context.set_generator(path);
        }

        Ok(context)
    }
}
