//! Helper binary spawned by `pg_embedded_setup_unpriv` when the database
//! integration suites run as root.
//!
//! Invoked as `pg_worker <operation> <config.json>`. The payload is a
//! [`pg_embedded_setup_unpriv::worker::WorkerPayload`]; the operation is one
//! of `setup`, `start`, `stop`, `cleanup`, or `cleanup-full`.

use std::env;
use std::ffi::{OsStr, OsString};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use color_eyre::eyre::{Context, Report, Result, eyre};
use pg_embedded_setup_unpriv::worker::{PlainSecret, WorkerPayload};
use postgresql_embedded::{PostgreSQL, Settings, Status};
use tokio::runtime::Builder;

fn main() -> Result<()> {
    color_eyre::install()?;
    run_worker(env::args_os())
}

fn run_worker(mut args: impl Iterator<Item = OsString>) -> Result<()> {
    let _program = args.next();
    let op_arg = args
        .next()
        .ok_or_else(|| eyre!("missing operation argument"))?;
    let operation = Operation::parse(&op_arg)?;
    let config_path = PathBuf::from(
        args.next()
            .ok_or_else(|| eyre!("missing config path argument"))?,
    );
    if let Some(extra) = args.next() {
        return Err(eyre!(
            "unexpected extra argument: {}; expected only operation and config path",
            extra.to_string_lossy()
        ));
    }

    let payload = load_payload(&config_path)?;
    execute(operation, payload)
}

fn load_payload(path: &Path) -> Result<WorkerPayload> {
    let payload =
        fs::read(path).with_context(|| format!("failed to read worker config at {path:?}"))?;
    let parsed: WorkerPayload = serde_json::from_slice(&payload)
        .with_context(|| format!("failed to parse worker config at {path:?}"))?;
    Ok(parsed)
}

fn execute(operation: Operation, payload: WorkerPayload) -> Result<()> {
    let settings = payload
        .settings
        .into_settings()
        .map_err(|err| Report::new(err).wrap_err("failed to rebuild postgres settings"))?;
    apply_environment(&payload.environment);

    match operation {
        Operation::Cleanup => return remove_cluster_dirs(&settings, false),
        Operation::CleanupFull => return remove_cluster_dirs(&settings, true),
        Operation::Setup | Operation::Start | Operation::Stop => {}
    }

    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("failed to build pg_worker runtime")?;

    let mut postgres = PostgreSQL::new(settings);
    runtime
        .block_on(async {
            match operation {
                Operation::Setup => ensure_setup(&mut postgres).await,
                Operation::Start => {
                    ensure_setup(&mut postgres).await?;
                    if postgres.status() == Status::Started {
                        return Ok(());
                    }
                    postgres.start().await
                }
                Operation::Stop => match postgres.stop().await {
                    Err(err) if is_missing_pid(&err) => Ok(()),
                    other => other,
                },
                Operation::Cleanup | Operation::CleanupFull => Ok(()),
            }
        })
        .with_context(|| format!("postgresql_embedded::{operation} failed"))?;

    if matches!(operation, Operation::Start) {
        // Dropping the handle would stop the server this process just started.
        std::mem::forget(postgres);
    }
    Ok(())
}

async fn ensure_setup(postgres: &mut PostgreSQL) -> Result<(), postgresql_embedded::Error> {
    let data_dir = postgres.settings().data_dir.clone();
    let initialised =
        data_dir.join("PG_VERSION").exists() && postgres.status() != Status::NotInstalled;
    if initialised {
        return Ok(());
    }
    postgres.setup().await
}

fn is_missing_pid(err: &postgresql_embedded::Error) -> bool {
    use postgresql_embedded::Error::{DatabaseStopError, IoError};
    matches!(
        err,
        DatabaseStopError(message) | IoError(message)
            if message.contains("postmaster.pid") && message.contains("does not exist")
    )
}

fn remove_cluster_dirs(settings: &Settings, include_install: bool) -> Result<()> {
    remove_dir_if_present(&settings.data_dir)?;
    if include_install {
        remove_dir_if_present(&settings.installation_dir)?;
    }
    Ok(())
}

fn remove_dir_if_present(path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() || path.parent().is_none() {
        return Err(eyre!("refusing to remove {path:?}"));
    }
    match fs::remove_dir_all(path) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
        Err(err) => Err(Report::new(err).wrap_err(format!("failed to remove {path:?}"))),
    }
}

fn apply_environment(environment: &[(String, Option<PlainSecret>)]) {
    for (key, value) in environment {
        // SAFETY: Called before the runtime spawns any threads.
        match value {
            Some(val) => unsafe { env::set_var(key, val.expose()) },
            None => unsafe { env::remove_var(key) },
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Operation {
    Setup,
    Start,
    Stop,
    Cleanup,
    CleanupFull,
}

impl Operation {
    fn parse(raw: &OsStr) -> Result<Self> {
        match raw.to_string_lossy().as_ref() {
            "setup" => Ok(Self::Setup),
            "start" => Ok(Self::Start),
            "stop" => Ok(Self::Stop),
            "cleanup" => Ok(Self::Cleanup),
            "cleanup-full" => Ok(Self::CleanupFull),
            other => Err(eyre!(
                "unknown pg_worker operation '{other}'; valid operations are setup, start, stop, cleanup, and cleanup-full"
            )),
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Setup => "setup",
            Self::Start => "start",
            Self::Stop => "stop",
            Self::Cleanup => "cleanup",
            Self::CleanupFull => "cleanup-full",
        })
    }
}
