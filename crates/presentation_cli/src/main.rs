//! Sensei CLI
//!
//! Command-line front end for a running Sensei server.

#![allow(clippy::print_stdout)]

use std::{path::PathBuf, sync::Arc};

use application::{
    ConversationStateStore, ProviderPreferences,
    ports::{SpeechPort, TranslationPort},
};
use clap::Parser;
use domain::{Question, SpeechOutput};
use infrastructure::{AppConfig, HttpLessonClient, LogFormat, init_logging};
use presentation_cli::{
    Cli, Commands, TerminalPlayback,
    cli::log_filter_from_verbosity,
    playback::save_audio,
    render::{self, DisplayOptions},
    repl::ReplSession,
};
use tokio::io::BufReader;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    init_logging(LogFormat::Text, log_filter_from_verbosity(cli.verbose));

    let config = AppConfig::load().unwrap_or_else(|e| {
        tracing::warn!("Failed to load config, using defaults: {}", e);
        AppConfig::default()
    });

    let url = cli.url.unwrap_or_else(|| config.client.server_url.clone());
    let client = HttpLessonClient::new(url, config.client.timeout_ms)?;
    let output_dir = |flag: Option<PathBuf>| {
        flag.unwrap_or_else(|| PathBuf::from(&config.client.output_dir))
    };

    match cli.command {
        Commands::Ask {
            question,
            speech,
            provider,
            no_furigana,
        } => {
            let mut question = Question::new(question, speech);
            question.provider = provider;

            let lesson = client.translate(&question).await?;
            print!(
                "{}",
                render::lesson(
                    &lesson,
                    DisplayOptions {
                        furigana: !no_furigana,
                        english: true,
                    }
                )
            );
        },

        Commands::Tts {
            text,
            teacher,
            provider,
            output,
        } => match client.synthesize(&text, teacher, provider).await? {
            SpeechOutput::Audio(audio) => {
                let path = save_audio(&output_dir(output), "speech", &audio).await?;
                println!("🔊 Saved {} ({} visemes)", path.display(), audio.visemes.len());
            },
            SpeechOutput::ClientDirective(directive) => {
                println!("{}", render::directive(&directive));
            },
        },

        Commands::Repl {
            teacher,
            speech,
            ai_provider,
            speech_provider,
            output,
        } => {
            let client = Arc::new(client);
            let playback = Arc::new(TerminalPlayback::new(output_dir(output)));
            let store = ConversationStateStore::new(client.clone(), client, playback)
                .with_providers(ProviderPreferences {
                    translation: ai_provider,
                    speech: speech_provider,
                });
            store.set_voice(teacher);
            store.set_register(speech);

            println!("🎌 Sensei · {teacher} · {speech} · /help for commands");
            ReplSession::new(Arc::new(store))
                .run(BufReader::new(tokio::io::stdin()))
                .await?;
        },

        Commands::Health => match client.health().await {
            Ok(health) => {
                println!("✅ Healthy");
                println!("{}", serde_json::to_string_pretty(&health)?);
            },
            Err(e) => {
                println!("❌ Unhealthy: {e}");
                std::process::exit(1);
            },
        },
    }

    Ok(())
}
