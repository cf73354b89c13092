//! pr20 engine - standalone demo entry point.
//!
//! Wires the in-memory adapters, builds a character through the builder
//! flow, rolls a couple of checks and prints the message log and the
//! resulting sheet.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pr20_domain::FormData;
use pr20_engine::infrastructure::{
    dice::RandomDieRoller,
    memory::{InMemoryCharacterRepo, InMemoryMessageLog, ScriptedDialog},
    ports::{DialogResponse, PROCEED_BUTTON, ROLL_BUTTON},
    random::SystemRandom,
    settings::RulesSettings,
};
use pr20_engine::App;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment from repo root (the binary may run from `crates/engine`).
    load_dotenv_from_repo_root();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pr20_engine=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting pr20 engine demo");

    let settings = RulesSettings::from_env();

    let log = Arc::new(InMemoryMessageLog::new());
    let dialog = Arc::new(ScriptedDialog::new([
        DialogResponse::clicked(PROCEED_BUTTON),
        DialogResponse::clicked(ROLL_BUTTON).with_fields(
            FormData::new()
                .with("mode", "edge")
                .with("bonus", "1")
                .with("specialized", true),
        ),
    ]));
    let app = App::new(
        &settings,
        Arc::new(InMemoryCharacterRepo::new()),
        Arc::new(RandomDieRoller::new(Arc::new(SystemRandom::new()))),
        log.clone(),
        dialog,
    );

    // Slightly over budget on purpose so the warnings dialog shows up.
    let builder_form = FormData::new()
        .with("name", "Jason Lee Scott")
        .with("role", "Red Ranger")
        .with("essence.strength", "4")
        .with("essence.speed", "3")
        .with("essence.smarts", "2")
        .with("essence.social", "4")
        .with("skill.athletics.rank", "2")
        .with("skill.might.rank", "2")
        .with("skill.athletics.specialized", true)
        .with("skill.athletics.specialization", "Martial Arts")
        .with("skill.conditioning.rank", "3")
        .with("health.base", "10")
        .with("health.value", "99")
        .with("armor.training", "medium")
        .with("morphed", true);

    let outcome = app
        .use_cases
        .character_builder
        .submit
        .execute(&builder_form, None)
        .await?;
    for warning in outcome.warnings() {
        tracing::warn!(%warning, "Builder warning");
    }
    let Some(character) = outcome.character() else {
        anyhow::bail!("character was not committed");
    };
    let id = character.id();

    app.use_cases
        .skill_check
        .prompt
        .execute(id, "athletics")
        .await?;
    app.use_cases
        .skill_check
        .roll
        .execute(id, "might", Default::default())
        .await?;
    match app
        .use_cases
        .skill_check
        .prompt
        .execute(id, "conditioning")
        .await
    {
        Err(e) if e.is_refusal() => {
            tracing::info!(error = %e, "Conditioning roll refused as expected");
        }
        Err(e) => return Err(e.into()),
        Ok(_) => anyhow::bail!("conditioning should not be rollable"),
    }

    for entry in log.entries().await {
        println!("[{}]\n{}\n", entry.speaker, entry.content);
    }

    let sheet = app.use_cases.character_sheet.prepare(id).await?;
    println!("{}", serde_json::to_string_pretty(&sheet.view)?);

    Ok(())
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}
