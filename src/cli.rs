use std::io::{BufRead, Write};

use clap::Parser;
use tracing::info;

use crate::builder::WorkspaceBuilder;
use crate::config::{
    ConfigField, WorkspaceConfig, DEFAULT_FALLBACK, DEFAULT_INPUT_FILE, DEFAULT_INTENT_PREFIX,
    DEFAULT_LANGUAGE, DEFAULT_OUTPUT_FILE, DEFAULT_WORKSPACE_DESCRIPTION, DEFAULT_WORKSPACE_ID,
    DEFAULT_WORKSPACE_NAME,
};
use crate::document::WorkspaceDocument;
use crate::error::Result;
use crate::sink::write_document;
use crate::source::read_rows_from_path;
use crate::timestamp::GenerationTimestamp;

#[derive(Parser, Debug, Clone)]
#[command(name = "corpus2workspace")]
#[command(about = "Build a conversational workspace JSON from a CSV training corpus", long_about = None)]
#[command(version)]
pub struct Cli {
    /// CSV corpus: answer first, then any number of questions per row
    #[arg(short, long, env = "CORPUS2WS_INPUT", default_value = DEFAULT_INPUT_FILE)]
    pub input: String,

    /// Where to write the workspace JSON
    #[arg(short, long, env = "CORPUS2WS_OUTPUT", default_value = DEFAULT_OUTPUT_FILE)]
    pub output: String,

    #[arg(long, env = "CORPUS2WS_WORKSPACE_ID", default_value = DEFAULT_WORKSPACE_ID)]
    pub workspace_id: String,

    #[arg(long, env = "CORPUS2WS_NAME", default_value = DEFAULT_WORKSPACE_NAME)]
    pub name: String,

    #[arg(long, env = "CORPUS2WS_DESCRIPTION", default_value = DEFAULT_WORKSPACE_DESCRIPTION)]
    pub description: String,

    /// Two letter language code
    #[arg(long, env = "CORPUS2WS_LANGUAGE", default_value = DEFAULT_LANGUAGE)]
    pub language: String,

    /// Response of the fallback node
    #[arg(long, env = "CORPUS2WS_FALLBACK", default_value = DEFAULT_FALLBACK)]
    pub fallback: String,

    /// Intents are named `{prefix}_{row}`
    #[arg(long, env = "CORPUS2WS_INTENT_PREFIX", default_value = DEFAULT_INTENT_PREFIX)]
    pub intent_prefix: String,

    /// Prompt for every value, offering the current one as default
    #[arg(long)]
    pub interactive: bool,

    /// Indent the written JSON
    #[arg(long)]
    pub pretty: bool,
}

impl Cli {
    pub fn value(&self, field: ConfigField) -> &str {
        match field {
            ConfigField::InputFile => &self.input,
            ConfigField::OutputFile => &self.output,
            ConfigField::WorkspaceId => &self.workspace_id,
            ConfigField::WorkspaceName => &self.name,
            ConfigField::Description => &self.description,
            ConfigField::Language => &self.language,
            ConfigField::Fallback => &self.fallback,
            ConfigField::IntentPrefix => &self.intent_prefix,
        }
    }

    fn value_mut(&mut self, field: ConfigField) -> &mut String {
        match field {
            ConfigField::InputFile => &mut self.input,
            ConfigField::OutputFile => &mut self.output,
            ConfigField::WorkspaceId => &mut self.workspace_id,
            ConfigField::WorkspaceName => &mut self.name,
            ConfigField::Description => &mut self.description,
            ConfigField::Language => &mut self.language,
            ConfigField::Fallback => &mut self.fallback,
            ConfigField::IntentPrefix => &mut self.intent_prefix,
        }
    }

    /// Ask for each value in turn
    ///
    /// An empty answer (or end of input) keeps the current value; an answer
    /// that does not match the field's pattern is rejected and asked again.
    pub fn prompt<R: BufRead, W: Write>(&mut self, mut input: R, mut output: W) -> Result<()> {
        for field in ConfigField::ALL {
            loop {
                write!(output, "{} ({}): ", field.prompt(), self.value(field))?;
                output.flush()?;

                let mut line = String::new();
                if input.read_line(&mut line)? == 0 {
                    writeln!(output)?;
                    break;
                }

                let answer = line.trim_end_matches(['\r', '\n']);
                if answer.is_empty() {
                    break;
                }
                if field.is_valid(answer) {
                    *self.value_mut(field) = answer.to_string();
                    break;
                }
                writeln!(output, "{}", field.message())?;
            }
        }
        Ok(())
    }

    /// Check every value against its pattern
    pub fn validate(&self) -> Result<()> {
        ConfigField::ALL
            .into_iter()
            .try_for_each(|field| field.validate(self.value(field)))
    }

    pub fn workspace_config(&self, generated: GenerationTimestamp) -> WorkspaceConfig {
        WorkspaceConfig::with_timestamp(generated)
            .with_workspace_id(&self.workspace_id)
            .with_name(&self.name)
            .with_description(&self.description)
            .with_language(&self.language)
            .with_fallback(&self.fallback)
            .with_intent_prefix(&self.intent_prefix)
    }

    /// Read the corpus, build the workspace and write it out
    pub async fn run(&self) -> Result<WorkspaceDocument> {
        self.validate()?;
        let config = self.workspace_config(GenerationTimestamp::now());

        info!(input = %self.input, "Reading corpus");
        let rows = read_rows_from_path(&self.input).await?;
        let document = WorkspaceBuilder::new(&config).build_raw(&rows)?;
        write_document(&self.output, &document, self.pretty).await?;

        Ok(document)
    }
}
