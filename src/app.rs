use std::fs::File;
use std::io::{BufRead, BufReader, Write};

use anyhow::Context;
use log::{debug, info};

use crate::linked_list::StringLinkedList;
use crate::utils::config::Config;
use crate::utils::script::{RunSummary, Session};

type Result<T> = anyhow::Result<T>;

/// Builds the starting list from `config` and runs the configured script.
///
/// The script is read from the file named in `config`, or from `stdin` when
/// there is none. Command output goes to `output`.
pub fn run<R, W>(config: &Config, stdin: R, output: W) -> Result<RunSummary>
where
    R: BufRead,
    W: Write,
{
    debug!("{:?}", config);

    let list = StringLinkedList::from_values(config.init.iter().cloned());
    let mut session = Session::new(list, config.strict);

    let summary = match config.script_path() {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open script {}", path.display()))?;
            session.run(BufReader::new(file), output)?
        }
        None => session.run(stdin, output)?,
    };

    info!(
        "ran {} commands, {} errors, final length {}",
        summary.commands,
        summary.errors,
        session.list().len()
    );
    Ok(summary)
}
