use std::{
    fmt,
    fs::File,
    io::{self, BufReader, BufWriter, Write},
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context;
use footbot_optimizer::{MicroLpSolver, Solver, WithTimeout};
use footbot_season::SeasonDataset;
use serde::{Serialize, de::DeserializeOwned};

/// Destination of a command's JSON report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Output {
    Stdout,
    File(PathBuf),
}

impl fmt::Display for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Output::Stdout => f.write_str("stdout"),
            Output::File(path) => write!(f, "{}", path.display()),
        }
    }
}

impl From<Option<PathBuf>> for Output {
    fn from(path: Option<PathBuf>) -> Self {
        path.map_or(Output::Stdout, Output::File)
    }
}

impl Output {
    /// Write `value` as pretty-printed JSON followed by a newline
    ///
    /// # Arguments
    ///
    /// * `value` - Report to serialize
    /// * `output_path` - File to create or truncate; `None` writes to stdout
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be created or the JSON cannot be written
    pub(crate) fn save_json<T>(value: &T, output_path: Option<PathBuf>) -> anyhow::Result<()>
    where
        T: Serialize,
    {
        Output::from(output_path).write_json(value)
    }

    fn write_json<T>(&self, value: &T) -> anyhow::Result<()>
    where
        T: Serialize,
    {
        let written = match self {
            Output::Stdout => write_pretty_json(io::stdout().lock(), value),
            Output::File(path) => {
                let file = File::create(path)
                    .with_context(|| format!("Failed to create output file: {self}"))?;
                write_pretty_json(BufWriter::new(file), value)
            }
        };
        written.with_context(|| format!("Failed to write JSON to {self}"))?;
        if matches!(self, Output::File(_)) {
            log::info!("wrote {self}");
        }
        Ok(())
    }
}

fn write_pretty_json<W, T>(mut writer: W, value: &T) -> io::Result<()>
where
    W: Write,
    T: Serialize,
{
    serde_json::to_writer_pretty(&mut writer, value)?;
    writeln!(writer)?;
    writer.flush()
}

/// Read and deserialize a JSON file
///
/// # Arguments
///
/// * `file_kind` - What the file holds, used in error messages (e.g. "player pool")
/// * `path` - Path to the JSON file
///
/// # Errors
///
/// Returns error if the file cannot be opened or does not parse as `T`
pub(crate) fn read_json_file<T, P>(file_kind: &str, path: P) -> anyhow::Result<T>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open {file_kind} file: {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse {file_kind} JSON file: {}", path.display()))
}

/// Read a season dataset and find its last gameweek
///
/// # Arguments
///
/// * `path` - Path to the dataset JSON file
///
/// # Returns
///
/// The dataset together with the last gameweek it has data for
///
/// # Errors
///
/// Returns error if the file cannot be read or holds no gameweeks
pub(crate) fn read_dataset_file<P>(path: P) -> anyhow::Result<(SeasonDataset, u32)>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let dataset: SeasonDataset = read_json_file("dataset", path)?;
    let last_event = dataset
        .last_event()
        .with_context(|| format!("Dataset has no gameweeks: {}", path.display()))?;
    log::info!(
        "loaded season {} with {} gameweek(s) from {}",
        dataset.season,
        dataset.gameweeks.len(),
        path.display()
    );
    Ok((dataset, last_event))
}

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct SolverArg {
    /// Give up on a single solve after this many seconds
    #[arg(long)]
    solver_timeout: Option<u64>,
}

impl SolverArg {
    pub(crate) fn build(&self) -> Box<dyn Solver> {
        match self.solver_timeout {
            Some(secs) => Box::new(WithTimeout::new(
                MicroLpSolver,
                Duration::from_secs(secs),
            )),
            None => Box::new(MicroLpSolver),
        }
    }
}
