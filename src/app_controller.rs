use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, anyhow};
use log::{debug, info, warn};

use crate::alignment::{Aligner, AlignmentReport, AnnotatedText};
use crate::app_config::Config;
use crate::file_utils::FileManager;
use crate::output::{AlignmentWriter, ClipSettings, OutputFormat};
use crate::subtitle_processor::SubtitleParser;
use crate::timecode;

// @module: Application controller for subtitle alignment

/// Main application controller: Parser → Index → Matcher → Output
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Parse a subtitle file and index its sanitized text.
    ///
    /// Any subtitle error aborts here; nothing is matched against a partial track.
    pub fn build_index<P: AsRef<Path>>(&self, subtitle_path: P) -> Result<AnnotatedText> {
        let subtitle_path = subtitle_path.as_ref();
        let parser = SubtitleParser::new(self.config.timestamp_policy);
        let records = parser
            .parse_file(subtitle_path)
            .with_context(|| format!("Failed to parse subtitle file: {}", subtitle_path.display()))?;

        if records.is_empty() {
            warn!("No timed subtitle records found in {}", subtitle_path.display());
        }

        Ok(AnnotatedText::from_records(&records))
    }

    /// Align every line of `lines_path` against the subtitle track
    pub fn align_files<P1: AsRef<Path>, P2: AsRef<Path>>(
        &self,
        subtitle_path: P1,
        lines_path: P2,
    ) -> Result<AlignmentReport> {
        let start_time = Instant::now();
        let index = self.build_index(subtitle_path)?;

        let lines_path = lines_path.as_ref();
        let lines = FileManager::read_lines(lines_path)
            .with_context(|| format!("Failed to read lines from: {}", lines_path.display()))?;
        debug!("Read {} query line(s)", lines.len());

        let report = Aligner::new(&index).align_all(&lines);
        info!(
            "Aligned {}/{} line(s) in {:.2?}",
            report.aligned.len(),
            report.total(),
            start_time.elapsed()
        );
        Ok(report)
    }

    /// Run the alignment pipeline and write the rendered result.
    ///
    /// Writes to `output` when given, otherwise to stdout.
    pub fn run(
        &self,
        subtitle_path: &Path,
        lines_path: &Path,
        media_path: Option<PathBuf>,
        output: Option<&Path>,
    ) -> Result<AlignmentReport> {
        if self.config.output.format == OutputFormat::Ffmpeg && media_path.is_none() {
            return Err(anyhow!("The ffmpeg output format requires --media"));
        }
        let writer = self.writer(media_path);

        let report = self.align_files(subtitle_path, lines_path)?;
        let rendered = writer.render(&report.aligned)?;
        self.emit(&rendered, output)?;

        for skipped in &report.skipped {
            debug!("Line {} skipped: {}", skipped.line_number, skipped.reason);
        }
        Ok(report)
    }

    /// Turn a file of `START --> END [¶] comment` lines into ffmpeg commands.
    ///
    /// Blank lines are ignored; any other line that does not parse aborts.
    pub fn run_clips(&self, ranges_path: &Path, media_path: PathBuf, output: Option<&Path>) -> Result<usize> {
        let lines = FileManager::read_lines(ranges_path)
            .with_context(|| format!("Failed to read ranges from: {}", ranges_path.display()))?;

        let mut clips = Vec::new();
        for (idx, line) in lines.iter().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let (interval, comment) = timecode::parse_annotated_range(line)
                .with_context(|| format!("Invalid range on line {} of {}", idx + 1, ranges_path.display()))?;
            clips.push((clips.len() + 1, interval, comment));
        }

        let writer = self.writer(Some(media_path));
        let rendered = writer.render_clips(
            clips
                .iter()
                .map(|(number, interval, comment)| (*number, *interval, comment.as_str())),
        )?;
        self.emit(&rendered, output)?;

        info!("Generated {} clip command(s)", clips.len());
        Ok(clips.len())
    }

    fn writer(&self, media_path: Option<PathBuf>) -> AlignmentWriter {
        AlignmentWriter::new(
            self.config.output.format,
            ClipSettings {
                media_path,
                slop_ms: self.config.slop_ms,
                clip_prefix: self.config.output.clip_prefix.clone(),
                clip_extension: self.config.output.clip_extension.clone(),
            },
        )
    }

    fn emit(&self, rendered: &str, output: Option<&Path>) -> Result<()> {
        match output {
            Some(path) => {
                FileManager::write_to_file(path, rendered)?;
                info!("Wrote {}", path.display());
            }
            None => {
                let mut stdout = std::io::stdout().lock();
                stdout
                    .write_all(rendered.as_bytes())
                    .and_then(|_| stdout.flush())
                    .context("Failed to write to stdout")?;
            }
        }
        Ok(())
    }
}
