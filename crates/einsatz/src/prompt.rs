//! Prompt construction for the text-generation service.
//!
//! The instructional template is fixed; the only variation is the highway
//! identifier and the three rendered incident sections. Empty categories are
//! handled entirely by the placeholder sentence, never by branching inside
//! the template.

use einsatz_common::model::IncidentRecord;

pub const ROADWORKS_LABEL: &str = "Baustelle";
pub const WARNINGS_LABEL: &str = "Verkehrsmeldung";
pub const CLOSURES_LABEL: &str = "Sperrung";

/// Renders one category as numbered blocks, one per record.
///
/// Each block is headed `--- {label} #{n} ---` and lists one `field: value`
/// line per non-absent field, in the record's field order. An empty input
/// renders the fixed no-data sentence for that category.
pub fn format_incidents(records: &[IncidentRecord], label: &str) -> String {
    if records.is_empty() {
        return format!("Keine {label} Daten verfügbar.");
    }
    records
        .iter()
        .enumerate()
        .map(|(i, record)| {
            let lines: Vec<String> = record
                .fields()
                .into_iter()
                .map(|(name, value)| format!("{name}: {value}"))
                .collect();
            format!("--- {label} #{} ---\n{}", i + 1, lines.join("\n"))
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Builds the full prompt asking for an operations e-mail to the highway
/// patrol standby unit for one highway.
pub fn einsatz_email_prompt(
    road_id: &str,
    roadworks: &[IncidentRecord],
    warnings: &[IncidentRecord],
    closures: &[IncidentRecord],
) -> String {
    let roadworks_str = format_incidents(roadworks, ROADWORKS_LABEL);
    let warnings_str = format_incidents(warnings, WARNINGS_LABEL);
    let closures_str = format_incidents(closures, CLOSURES_LABEL);

    format!(
        r#"Du bist ein KI-Assistent für die Autobahnpolizei. Deine Aufgabe ist es, die aktuelle Verkehrslage auf der Autobahn {road_id} zu analysieren und eine prägnante, handlungsorientierte E-Mail für die Bereitschaft zu formulieren.

**Ziel der E-Mail:**
Informiere die Autobahnpolizei-Bereitschaft über relevante Vorkommnisse (Baustellen, Verkehrsmeldungen, Sperrungen) auf der Autobahn {road_id}, die möglicherweise einen sofortigen Einsatz erfordern oder eine besondere Aufmerksamkeit verdienen.
Schlage zudem vor, wohin die Bereitschaft aktuell fahren könnte und was dort zu tun wäre.

**Priorisiere folgende Informationen in deiner Analyse und E-Mail:**
1.  **Sperrungen:** Sind Vollsperrungen oder größere Teilsperrungen vorhanden? Wo genau und wie lange? Was ist die empfohlene Umleitung?
2.  **Verkehrsmeldungen:** Gibt es Unfälle, gefährliche Objekte auf der Fahrbahn, Falschfahrer, Staus mit hohem Rückstaupotenzial oder andere akute Gefahren? Wo genau ist der Vorfall und welche Maßnahmen sind denkbar (z.B. Absicherung, Bergung, Verkehrsleitung)?
3.  **Baustellen:** Gibt es größere Baustellen, die zu erheblichen Verkehrsbehinderungen führen oder eine besondere Überwachung erfordern (z.B. an Unfallschwerpunkten)?

**Instruktionen für die E-Mail:**
* **Betreffzeile:** Beginne mit "Einsatzhinweis {road_id}:" gefolgt von einer kurzen, prägnanten Zusammenfassung der wichtigsten Punkte (z.B. "Einsatzhinweis A8: Unfall und Baustelle bei Stuttgart").
* **Anrede:** "Sehr geehrte Kolleginnen und Kollegen der Autobahnpolizei-Bereitschaft,"
* **Einleitung:** Kurze Zusammenfassung der aktuellen Lage.
* **Details:** Liste die relevantesten Vorkommnisse in Stichpunkten auf, jeweils mit:
    * Art des Vorkommnisses (z.B. "Sperrung", "Verkehrsmeldung", "Baustelle")
    * Genauer Ort/Abschnitt (Kilometerangaben oder nahegelegene Städte/Anschlussstellen)
    * Kurze Beschreibung der Lage und ihrer Auswirkungen.
    * **Konkrete Empfehlung für den Einsatzort und die Aufgabe der Bereitschaft.**
* **Abschluss:** "Mit freundlichen Grüßen,"
* **Signatur:** "Ihr KI-Verkehrsassistent"

**Rohdaten für die Analyse der Autobahn {road_id}:**

<Baustellen>
{roadworks_str}
</Baustellen>

<Verkehrsmeldungen>
{warnings_str}
</Verkehrsmeldungen>

<Sperrungen>
{closures_str}
</Sperrungen>

Bitte generiere jetzt die komplette E-Mail im angegebenen Format. Wenn keine relevanten Vorkommnisse vorliegen, formuliere eine entsprechende kurze E-Mail.
"#
    )
}

/// Independent entry point: a generic summarization prompt with no
/// incident-specific structure.
pub fn summary_prompt(text_to_summarize: &str) -> String {
    format!(
        r#"Fasse den folgenden Text prägnant zusammen und extrahiere die wichtigsten Informationen. Konzentriere dich auf Orte, Ereignisse und potenzielle Auswirkungen:

Text:
{text_to_summarize}
"#
    )
}
