use super::print;
use super::setup::{Cli, Commands};
use directories::ProjectDirs;
use notabene::api::NotabeneApi;
use notabene::commands::sharing::Access;
use notabene::commands::Settings;
use notabene::config::NotabeneConfig;
use notabene::error::{NotabeneError, Result};
use notabene::model::UserId;
use notabene::store::fs::FileStore;
use serde::Serialize;
use std::path::PathBuf;
use tracing::debug;
use uuid::Uuid;

pub struct AppContext {
    api: NotabeneApi<FileStore>,
    config: NotabeneConfig,
    data_dir: PathBuf,
    user: Option<UserId>,
    json: bool,
}

impl AppContext {
    fn note_id(&self, input: &str) -> Result<Uuid> {
        self.api.resolve_note(input)
    }

    fn emit<T: Serialize>(&self, value: &T, human: impl FnOnce(&T)) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value)?);
        } else {
            human(value);
        }
        Ok(())
    }
}

pub fn run(cli: Cli) -> Result<()> {
    let mut ctx = init_context(&cli)?;

    match cli.command {
        Commands::New { title, content } => handle_new(&mut ctx, title, content),
        Commands::List => handle_list(&ctx),
        Commands::Show { note } => handle_show(&ctx, &note),
        Commands::Edit {
            note,
            title,
            content,
            revision,
        } => handle_edit(&mut ctx, &note, title, content, revision),
        Commands::Delete { note } => handle_delete(&mut ctx, &note),
        Commands::Share { note, with, write } => handle_share(&mut ctx, &note, with, write),
        Commands::Unshare { note, from, write } => handle_unshare(&mut ctx, &note, from, write),
        Commands::History { note } => handle_history(&ctx, &note),
        Commands::Version { note, number } => handle_version(&ctx, &note, number),
        Commands::Restore { note, number } => handle_restore(&mut ctx, &note, number),
        Commands::Compare { note, left, right } => handle_compare(&ctx, &note, left, right),
        Commands::Config => handle_config(&ctx),
    }
}

fn default_data_dir() -> Result<PathBuf> {
    ProjectDirs::from("com", "notabene", "notabene")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| NotabeneError::Store("Could not determine a data directory".to_string()))
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let data_dir = match &cli.data_dir {
        Some(dir) => dir.clone(),
        None => default_data_dir()?,
    };
    let config = NotabeneConfig::load(&data_dir)?;
    debug!(dir = %data_dir.display(), ?config, "loaded configuration");

    let store = FileStore::new(data_dir.clone());
    let api = NotabeneApi::new(store, Settings::from(&config));

    Ok(AppContext {
        api,
        config,
        data_dir,
        user: cli.user.map(UserId),
        json: cli.json,
    })
}

fn handle_new(ctx: &mut AppContext, title: String, content: String) -> Result<()> {
    let note = ctx.api.create_note(title, content, ctx.user)?;
    ctx.emit(&note, |n| print::print_success(&format!("Note created: {}", n.id)))
}

fn handle_list(ctx: &AppContext) -> Result<()> {
    let notes = ctx.api.list_notes(ctx.user)?;
    ctx.emit(&notes, |n| print::print_notes(n))
}

fn handle_show(ctx: &AppContext, note: &str) -> Result<()> {
    let id = ctx.note_id(note)?;
    let note = ctx.api.get_note(&id, ctx.user)?;
    ctx.emit(&note, print::print_note)
}

fn handle_edit(
    ctx: &mut AppContext,
    note: &str,
    title: Option<String>,
    content: Option<String>,
    revision: Option<u64>,
) -> Result<()> {
    if title.is_none() && content.is_none() {
        return Err(NotabeneError::Validation(
            "Nothing to change, pass --title and/or --content".to_string(),
        ));
    }
    let id = ctx.note_id(note)?;
    let current = ctx.api.get_note(&id, ctx.user)?;
    let title = title.unwrap_or(current.title);
    let content = content.unwrap_or(current.content);

    let updated = match revision {
        Some(expected) => ctx
            .api
            .edit_at_revision(&id, expected, title, content, ctx.user)?,
        None => ctx.api.edit(&id, title, content, ctx.user)?,
    };
    ctx.emit(&updated, |n| {
        print::print_success(&format!("Note updated (revision {})", n.revision))
    })
}

fn handle_delete(ctx: &mut AppContext, note: &str) -> Result<()> {
    let id = ctx.note_id(note)?;
    let removed = ctx.api.delete_note(&id, ctx.user)?;
    let report = DeleteReport {
        id,
        versions_removed: removed,
    };
    ctx.emit(&report, |r| {
        print::print_success(&format!(
            "Note deleted: {} ({} versions removed)",
            r.id, r.versions_removed
        ))
    })
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DeleteReport {
    id: Uuid,
    versions_removed: usize,
}

fn access_for(write: bool) -> Access {
    if write {
        Access::Write
    } else {
        Access::Read
    }
}

fn handle_share(ctx: &mut AppContext, note: &str, with: u64, write: bool) -> Result<()> {
    let id = ctx.note_id(note)?;
    let access = access_for(write);
    let note = ctx.api.share(&id, UserId(with), access, ctx.user)?;
    ctx.emit(&note, |_| {
        print::print_success(&format!("User {} can now {} this note", with, access))
    })
}

fn handle_unshare(ctx: &mut AppContext, note: &str, from: u64, write: bool) -> Result<()> {
    let id = ctx.note_id(note)?;
    let access = access_for(write);
    let note = ctx.api.unshare(&id, UserId(from), access, ctx.user)?;
    ctx.emit(&note, |_| {
        print::print_success(&format!("User {} can no longer {} this note", from, access))
    })
}

fn handle_history(ctx: &AppContext, note: &str) -> Result<()> {
    let id = ctx.note_id(note)?;
    let versions = ctx.api.list_versions(&id, ctx.user)?;
    ctx.emit(&versions, |v| print::print_history(v))
}

fn handle_version(ctx: &AppContext, note: &str, number: u32) -> Result<()> {
    let id = ctx.note_id(note)?;
    let version = ctx.api.get_version(&id, number, ctx.user)?;
    ctx.emit(&version, print::print_version)
}

fn handle_restore(ctx: &mut AppContext, note: &str, number: u32) -> Result<()> {
    let id = ctx.note_id(note)?;
    let note = ctx.api.restore(&id, number, ctx.user)?;
    ctx.emit(&note, |n| {
        print::print_success(&format!("Restored version {}: {}", number, n.title))
    })
}

fn handle_compare(ctx: &AppContext, note: &str, left: u32, right: Option<u32>) -> Result<()> {
    let id = ctx.note_id(note)?;
    let right = match right {
        Some(number) => number,
        None => ctx
            .api
            .list_versions(&id, ctx.user)?
            .first()
            .map(|current| current.version_number)
            .unwrap_or(1),
    };
    let comparison = ctx.api.compare(&id, left, right, ctx.user)?;
    ctx.emit(&comparison, print::print_comparison)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ConfigReport<'a> {
    data_dir: &'a PathBuf,
    data_file: PathBuf,
    config_file: PathBuf,
    #[serde(flatten)]
    values: &'a NotabeneConfig,
}

fn handle_config(ctx: &AppContext) -> Result<()> {
    let report = ConfigReport {
        data_dir: &ctx.data_dir,
        data_file: ctx.api.store().location(),
        config_file: NotabeneConfig::file_path(&ctx.data_dir),
        values: &ctx.config,
    };
    ctx.emit(&report, |r| {
        print::print_config(&[
            ("data_dir", r.data_dir.display().to_string()),
            ("data_file", r.data_file.display().to_string()),
            ("config_file", r.config_file.display().to_string()),
            ("max_versions", r.values.max_versions.to_string()),
            ("title_max", r.values.title_max.to_string()),
            ("content_max", r.values.content_max.to_string()),
        ])
    })
}
