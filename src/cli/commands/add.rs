//! `qdl add` command - record a defect entry
//!
//! The CLI counterpart of the original form's "add area record" action:
//! collect field values (flags, or interactive prompts with suggestions
//! from the input history), submit them to the ledger, then flush.

use chrono::Local;
use console::style;
use dialoguer::{Completion, Input};
use miette::{IntoDiagnostic, Result};

use crate::cli::commands::open_session;
use crate::cli::GlobalOpts;
use crate::core::{parse_count, HistoryField, Session, Submission};

#[derive(clap::Args, Debug)]
pub struct AddArgs {
    /// Part identifier
    #[arg(long, short = 'i')]
    pub id: Option<String>,

    /// Part name (filled from the part's existing records when omitted)
    #[arg(long, short = 'p')]
    pub part: Option<String>,

    /// Production area
    #[arg(long, short = 'a')]
    pub area: Option<String>,

    /// First defect quantity (empty counts as 0)
    #[arg(long, value_name = "COUNT")]
    pub defect1_count: Option<String>,

    /// First defect type
    #[arg(long, value_name = "TYPE")]
    pub defect1_type: Option<String>,

    /// Second defect quantity (empty counts as 0)
    #[arg(long, value_name = "COUNT")]
    pub defect2_count: Option<String>,

    /// Second defect type
    #[arg(long, value_name = "TYPE")]
    pub defect2_type: Option<String>,

    /// Note appended to the record's log
    #[arg(long, short = 'n')]
    pub note: Option<String>,

    /// Interactive mode (prompt for fields; default when --id is missing)
    #[arg(long, short = 'I')]
    pub interactive: bool,
}

/// Raw field values, exactly as typed
struct Fields {
    id: String,
    part: String,
    area: String,
    defect1_count: String,
    defect1_type: String,
    defect2_count: String,
    defect2_type: String,
    note: String,
}

/// Prefix completion over a history sequence (newest entry wins)
struct HistoryCompletion<'a> {
    entries: &'a [String],
}

impl Completion for HistoryCompletion<'_> {
    fn get(&self, input: &str) -> Option<String> {
        let lower = input.to_lowercase();
        self.entries
            .iter()
            .find(|e| e.to_lowercase().starts_with(&lower))
            .cloned()
    }
}

pub fn run(args: AddArgs, global: &GlobalOpts) -> Result<()> {
    let mut session = open_session(global);

    let fields = if args.interactive || args.id.is_none() {
        prompt_fields(&session)?
    } else {
        Fields {
            id: args.id.unwrap_or_default(),
            part: args.part.unwrap_or_default(),
            area: args.area.unwrap_or_default(),
            defect1_count: args.defect1_count.unwrap_or_default(),
            defect1_type: args.defect1_type.unwrap_or_default(),
            defect2_count: args.defect2_count.unwrap_or_default(),
            defect2_type: args.defect2_type.unwrap_or_default(),
            note: args.note.unwrap_or_default(),
        }
    };

    let submission = Submission {
        part_id: fields.id.clone(),
        part_name: fields.part.clone(),
        area: fields.area.clone(),
        defect1_count: parse_count(&fields.defect1_count).map_err(|e| miette::miette!("{}", e))?,
        defect1_type: fields.defect1_type.clone(),
        defect2_count: parse_count(&fields.defect2_count).map_err(|e| miette::miette!("{}", e))?,
        defect2_type: fields.defect2_type.clone(),
        note: fields.note.clone(),
    };

    session
        .ledger
        .upsert(submission, Local::now())
        .map_err(|e| miette::miette!("{}", e))?;

    // Read back the merged record: it carries the trimmed key fields and
    // the part name actually used (possibly auto-filled)
    let (part_id, part_name, area, count1, count2) = {
        let record = session
            .ledger
            .get(fields.id.trim(), fields.area.trim())
            .ok_or_else(|| miette::miette!("record vanished after upsert"))?;
        (
            record.part_id.clone(),
            record.part_name.clone(),
            record.area.clone(),
            record.defect1_count,
            record.defect2_count,
        )
    };

    session.history.record_seen(HistoryField::Ids, &part_id);
    session.history.record_seen(HistoryField::Details, &part_name);
    session.history.record_seen(HistoryField::Areas, &area);

    session.flush().map_err(|e| miette::miette!("{}", e))?;

    if !global.quiet {
        println!(
            "{} Recorded {} / {} (defect 1: {}, defect 2: {})",
            style("✓").green(),
            style(&part_id).cyan(),
            area,
            count1,
            count2
        );
    }

    Ok(())
}

fn prompt_fields(session: &Session) -> Result<Fields> {
    let id_completion = HistoryCompletion {
        entries: session.history.suggestions(HistoryField::Ids),
    };
    let id: String = Input::new()
        .with_prompt("Part ID")
        .completion_with(&id_completion)
        .interact_text()
        .into_diagnostic()?;

    let part_completion = HistoryCompletion {
        entries: session.history.suggestions(HistoryField::Details),
    };
    let mut part_input = Input::new()
        .with_prompt("Part name")
        .allow_empty(true)
        .completion_with(&part_completion);
    if let Some(existing) = session.ledger.part_name_for(id.trim()) {
        part_input = part_input.default(existing.to_string());
    }
    let part: String = part_input.interact_text().into_diagnostic()?;

    let area_completion = HistoryCompletion {
        entries: session.history.suggestions(HistoryField::Areas),
    };
    let area: String = Input::new()
        .with_prompt("Production area")
        .completion_with(&area_completion)
        .interact_text()
        .into_diagnostic()?;

    let defect1_count: String = Input::new()
        .with_prompt("Defect 1 quantity")
        .allow_empty(true)
        .interact_text()
        .into_diagnostic()?;
    let defect1_type: String = Input::new()
        .with_prompt("Defect 1 type")
        .allow_empty(true)
        .interact_text()
        .into_diagnostic()?;

    let defect2_count: String = Input::new()
        .with_prompt("Defect 2 quantity")
        .allow_empty(true)
        .interact_text()
        .into_diagnostic()?;
    let defect2_type: String = Input::new()
        .with_prompt("Defect 2 type")
        .allow_empty(true)
        .interact_text()
        .into_diagnostic()?;

    let note: String = Input::new()
        .with_prompt("Note")
        .allow_empty(true)
        .interact_text()
        .into_diagnostic()?;

    Ok(Fields {
        id,
        part,
        area,
        defect1_count,
        defect1_type,
        defect2_count,
        defect2_type,
        note,
    })
}
