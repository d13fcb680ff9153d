//! One interactive session: fetch the catalog, let the operator pick a
//! highway and category, build the prompt, generate the draft, display it,
//! and send it on explicit confirmation.

use std::io::{BufRead, Write};

use tracing::{error, info};

use einsatz_common::autobahn::AutobahnClient;
use einsatz_common::gemini::{GeminiClient, GeminiConfig};
use einsatz_common::mailer::EmailSender;

use crate::config::Config;
use crate::dialog;
use crate::error::AppError;
use crate::prompt;

pub async fn run<R: BufRead, W: Write>(
    config: &Config,
    reader: &mut R,
    writer: &mut W,
) -> Result<(), AppError> {
    // Client construction is fatal: without the API or the credential there
    // is no session to run.
    let autobahn = AutobahnClient::new(&config.autobahn_api_url)?;
    let gemini = GeminiClient::new(GeminiConfig::new(&config.llm_model))?;
    info!(
        api = %autobahn.base_url(),
        model = %config.llm_model,
        "clients initialized"
    );

    // The catalog is the one fetch the session cannot do without.
    let roads = autobahn.roads().await?;
    info!(roads = roads.len(), "highway catalog fetched");

    let road = dialog::select_road(reader, writer, &roads)?;

    // Only the selected highway is fetched; each category degrades to empty
    // on its own when the API misbehaves.
    writeln!(writer, "Daten für die {road} werden abgerufen...")?;
    let bundle = autobahn.bundle(&road).await;
    writeln!(
        writer,
        "Auf der Autobahn {road} liegen {} Baustelle(n), {} Verkehrsmeldung(en) und {} Sperrung(en) vor.",
        bundle.roadworks.len(),
        bundle.warnings.len(),
        bundle.closures.len()
    )?;

    let category = dialog::select_category(reader, writer)?;
    let (roadworks, warnings, closures) = category.filter(bundle);
    let prompt = prompt::einsatz_email_prompt(&road, &roadworks, &warnings, &closures);

    writeln!(writer, "Der Einsatzhinweis wird erstellt...")?;
    let Some(summary) = gemini.generate(&prompt).await else {
        writeln!(writer, "Es konnte kein Einsatzhinweis erstellt werden. Bitte versuchen Sie es später erneut.")?;
        writeln!(writer, "Auf Wiedersehen!")?;
        return Ok(());
    };

    writeln!(writer)?;
    writeln!(writer, "--- Einsatzhinweis für die {road} ---")?;
    writeln!(writer, "{summary}")?;
    writeln!(writer)?;

    if dialog::confirm_send(reader, writer)? {
        match EmailSender::new(config.mailer_config()) {
            Ok(sender) => {
                let subject = format!("Einsatzhinweis {road}");
                if sender.send(&subject, &summary) {
                    writeln!(
                        writer,
                        "E-Mail '{subject}' erfolgreich an {} gesendet.",
                        config.test_receiver_email
                    )?;
                } else {
                    writeln!(writer, "Der E-Mail-Versand ist fehlgeschlagen.")?;
                }
            }
            Err(e) => {
                // Missing SMTP credential ends the dispatch, not the session.
                error!(error = %e, "mail sender could not be constructed");
                writeln!(writer, "E-Mail-Versand nicht möglich: SMTP-Zugangsdaten fehlen.")?;
            }
        }
    }

    writeln!(writer, "Auf Wiedersehen!")?;
    Ok(())
}
