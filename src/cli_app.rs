//! Top-level CLI definition and dispatch.

use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::{Shell as CompletionShell, generate};
use colored::{Colorize, control};
use serde_json::{Value, json};
use thiserror::Error;

use jan_saarthi::core::config::Config;
use jan_saarthi::core::errors::SaarthiError;
use jan_saarthi::dataset::{CandidateId, CandidateRecord};
use jan_saarthi::directory::{PartyFilter, SortKey, ToggleOutcome};
use jan_saarthi::locale::catalog::keys;
use jan_saarthi::locale::preferences::{self, LoadOutcome as PreferenceOutcome};
use jan_saarthi::locale::{Language, translate};
use jan_saarthi::logger::{ActivityLog, EventType, LogEntry, Severity};
use jan_saarthi::present::share::{ShareChannel, ShareLink, share_link, share_text};
use jan_saarthi::present::views::{
    AssetSection, CardView, CaseSection, ComparisonTable, DetailView, StatsView, SummaryView,
    card_view, case_section, comparison_table, detail_view, stats_view, summary_view,
};
use jan_saarthi::session::{
    LanguageSource, LoadState, Modal, Route, Session, SessionModel, SessionMsg,
};

/// Jan Saarthi: browse, filter, and compare candidate affidavits.
#[derive(Debug, Parser)]
#[command(
    name = "saarthi",
    author,
    version,
    about = "Jan Saarthi - Candidate Affidavit Directory",
    long_about = None,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Override config file path.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Override the candidate dataset path.
    #[arg(long, global = true, value_name = "PATH")]
    data: Option<PathBuf>,
    /// Render in this language for this run only (en, hi).
    #[arg(long, global = true, value_name = "LANG", value_parser = parse_language)]
    lang: Option<Language>,
    /// Force JSON output mode.
    #[arg(long, global = true)]
    json: bool,
    /// Disable colored output.
    #[arg(long, global = true)]
    no_color: bool,
    /// Increase verbosity.
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,
    /// Quiet mode (errors only).
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
    /// Subcommand to execute.
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Subcommand)]
enum Command {
    /// List candidates matching search, party, and sort criteria.
    List(ListArgs),
    /// Show one candidate's detail page.
    Show(ShowArgs),
    /// Compare two to five candidates side by side.
    Compare(CompareArgs),
    /// Show collection statistics.
    Stats(StatsArgs),
    /// Show or change the saved interface language.
    Lang(LangArgs),
    /// Build share links for a candidate.
    Share(ShareArgs),
    /// View configuration state.
    Config(ConfigArgs),
    /// Show version and optional build metadata.
    Version(VersionArgs),
    /// Generate shell completions.
    Completions(CompletionsArgs),
}

#[derive(Debug, Clone, Args, Default)]
struct CriteriaArgs {
    /// Case-insensitive text matched against name, constituency, and party.
    #[arg(short, long, value_name = "TEXT")]
    search: Option<String>,
    /// Party filter: all, inc, bjp.
    #[arg(long, default_value = "all", value_name = "PARTY", value_parser = parse_party)]
    party: PartyFilter,
    /// Sort order: relevance, assets-desc, assets-asc, name.
    #[arg(long, default_value = "relevance", value_name = "ORDER", value_parser = parse_sort)]
    sort: SortKey,
}

#[derive(Debug, Clone, Args, Default)]
struct ListArgs {
    #[command(flatten)]
    criteria: CriteriaArgs,
    /// Mark these candidates as selected for comparison.
    #[arg(long, value_delimiter = ',', value_name = "IDS")]
    compare: Vec<CandidateId>,
    /// Show at most this many cards.
    #[arg(long, value_name = "N")]
    limit: Option<usize>,
}

#[derive(Debug, Clone, Args)]
struct ShowArgs {
    /// Candidate id.
    id: CandidateId,
    /// Show only the plain-language summary.
    #[arg(long, conflicts_with = "cases")]
    summary: bool,
    /// Show only the criminal case details.
    #[arg(long)]
    cases: bool,
}

#[derive(Debug, Clone, Args)]
struct CompareArgs {
    /// Candidate ids in selection order (extra ids beyond five are ignored).
    #[arg(required = true, num_args = 1.., value_delimiter = ',', value_name = "ID")]
    ids: Vec<CandidateId>,
}

#[derive(Debug, Clone, Args, Default)]
struct StatsArgs {
    #[command(flatten)]
    criteria: CriteriaArgs,
    /// Candidates selected for comparison.
    #[arg(long, value_delimiter = ',', value_name = "IDS")]
    compare: Vec<CandidateId>,
}

#[derive(Debug, Clone, Args)]
struct LangArgs {
    #[command(subcommand)]
    command: Option<LangCommand>,
}

#[derive(Debug, Clone, Subcommand)]
enum LangCommand {
    /// Print the effective language and where it came from.
    Show,
    /// Save a language preference.
    Set {
        /// Language tag (en, hi).
        #[arg(value_parser = parse_language)]
        language: Language,
    },
    /// Switch to the other language and save it.
    Toggle,
}

#[derive(Debug, Clone, Args)]
struct ShareArgs {
    /// Candidate id.
    id: CandidateId,
    /// Only build the link for this channel (whatsapp, telegram, email).
    #[arg(long, value_name = "CHANNEL", value_parser = parse_channel)]
    channel: Option<ShareChannel>,
    /// Print the shared summary text as well.
    #[arg(long)]
    text: bool,
}

#[derive(Debug, Clone, Args)]
struct ConfigArgs {
    #[command(subcommand)]
    command: Option<ConfigCommand>,
}

#[derive(Debug, Clone, Subcommand)]
enum ConfigCommand {
    /// Print the config file path.
    Path,
    /// Print the effective configuration.
    Show,
}

#[derive(Debug, Clone, Args)]
struct VersionArgs {
    /// Include additional build metadata fields.
    #[arg(long)]
    verbose: bool,
}

#[derive(Debug, Clone, Args)]
struct CompletionsArgs {
    /// Shell to generate completion script for.
    #[arg(value_enum)]
    shell: CompletionShell,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
    Human,
    Json,
}

/// CLI error type with explicit exit-code mapping.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid user input at runtime.
    #[error("{0}")]
    User(String),
    /// Environment/runtime failure.
    #[error("{0}")]
    Runtime(String),
    /// Internal bug or invariant violation.
    #[error("{0}")]
    Internal(String),
    /// JSON serialization failed.
    #[error("failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),
    /// Output write failed.
    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
}

impl CliError {
    /// Process exit code contract for the CLI.
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::User(_) => 1,
            Self::Runtime(_) | Self::Io(_) => 2,
            Self::Internal(_) | Self::Json(_) => 3,
        }
    }
}

impl From<SaarthiError> for CliError {
    fn from(err: SaarthiError) -> Self {
        match err {
            SaarthiError::ShareLink { .. } | SaarthiError::Serialization { .. } => {
                Self::Internal(err.to_string())
            }
            e if e.is_user_error() => Self::User(e.to_string()),
            e => Self::Runtime(e.to_string()),
        }
    }
}

/// Dispatch CLI commands.
pub fn run(cli: &Cli) -> Result<(), CliError> {
    if cli.no_color {
        control::set_override(false);
    }

    match &cli.command {
        Command::List(args) => run_list(cli, args),
        Command::Show(args) => run_show(cli, args),
        Command::Compare(args) => run_compare(cli, args),
        Command::Stats(args) => run_stats(cli, args),
        Command::Lang(args) => run_lang(cli, args),
        Command::Share(args) => run_share(cli, args),
        Command::Config(args) => run_config(cli, args),
        Command::Version(args) => emit_version(cli, args),
        Command::Completions(args) => {
            let mut command = Cli::command();
            let binary_name = command.get_name().to_string();
            generate(args.shell, &mut command, binary_name, &mut io::stdout());
            Ok(())
        }
    }
}

// ──────────────────── argument parsers ────────────────────

fn parse_language(raw: &str) -> Result<Language, String> {
    Language::from_tag(raw).ok_or_else(|| format!("unsupported language {raw:?} (expected en or hi)"))
}

#[allow(clippy::unnecessary_wraps)]
fn parse_party(raw: &str) -> Result<PartyFilter, String> {
    Ok(PartyFilter::from_tag(raw))
}

fn parse_sort(raw: &str) -> Result<SortKey, String> {
    SortKey::from_tag(raw).ok_or_else(|| {
        format!("unknown sort order {raw:?} (expected relevance, assets-desc, assets-asc, name)")
    })
}

fn parse_channel(raw: &str) -> Result<ShareChannel, String> {
    ShareChannel::from_tag(raw)
        .ok_or_else(|| format!("unknown share channel {raw:?} (expected whatsapp, telegram, email)"))
}

// ──────────────────── session plumbing ────────────────────

fn load_config(cli: &Cli) -> Result<Config, CliError> {
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(data) = &cli.data {
        config.data.candidates_file.clone_from(data);
    }
    Ok(config)
}

/// Start a session with the dataset loaded; a failed load is a runtime error.
fn start_session(cli: &Cli) -> Result<Session, CliError> {
    let config = load_config(cli)?;
    let session = Session::start(&config, cli.lang);
    let model = session.model();

    if cli.verbose {
        eprintln!(
            "[JSR-CLI] language {} ({}); {} candidates from {}",
            model.language.tag(),
            language_source_label(session.language_source()),
            model.dataset.len(),
            config.data.candidates_file.display()
        );
    }

    if let LoadState::Failed { code, details } = &model.load {
        let message = translate(model.language, keys::DATA_LOAD_FAILED);
        return Err(CliError::Runtime(format!("{message} [{code}] {details}")));
    }
    Ok(session)
}

fn apply_criteria(session: &mut Session, criteria: &CriteriaArgs) {
    session.dispatch_all([
        SessionMsg::SetSearch(criteria.search.clone().unwrap_or_default()),
        SessionMsg::SetPartyFilter(criteria.party),
        SessionMsg::SetSort(criteria.sort),
    ]);
}

/// Toggle each id into the comparison set; returns ids dropped at capacity.
fn select_for_comparison(
    cli: &Cli,
    session: &mut Session,
    ids: &[CandidateId],
) -> Result<Vec<CandidateId>, CliError> {
    let mut ignored = Vec::new();
    for &id in ids {
        require_candidate(session.model(), id)?;
        if session.model().is_compared(id) {
            continue;
        }
        session.dispatch(SessionMsg::ToggleCompare(id));
        if session.model().last_toggle == Some(ToggleOutcome::AtCapacity) {
            ignored.push(id);
        }
    }
    if !ignored.is_empty() && !cli.quiet {
        eprintln!("[JSR-CLI] comparison is full; ignored ids {ignored:?}");
    }
    Ok(ignored)
}

/// Look up `id`, reporting an unknown id with its localized message and code.
fn require_candidate(model: &SessionModel, id: CandidateId) -> Result<&CandidateRecord, CliError> {
    model.dataset.require(id).map_err(|err| {
        let message = translate(model.language, keys::CANDIDATE_NOT_FOUND);
        CliError::User(format!("{message} [{}] {id}", err.code()))
    })
}

const fn language_source_label(source: LanguageSource) -> &'static str {
    match source {
        LanguageSource::Override => "--lang",
        LanguageSource::Persisted => "saved preference",
        LanguageSource::Default => "default",
    }
}

// ──────────────────── list ────────────────────

fn run_list(cli: &Cli, args: &ListArgs) -> Result<(), CliError> {
    let mut session = start_session(cli)?;
    apply_criteria(&mut session, &args.criteria);
    select_for_comparison(cli, &mut session, &args.compare)?;

    let model = session.model();
    let language = model.language;
    let stats = model.stats();
    let visible = model.visible();
    let cards: Vec<CardView> = visible
        .iter()
        .take(args.limit.unwrap_or(usize::MAX))
        .map(|record| card_view(record, stats, language, model.is_compared(record.id)))
        .collect();

    match output_mode(cli) {
        OutputMode::Human => {
            if model.shows_empty_state() {
                println!("{}", translate(language, keys::NO_CANDIDATES_FOUND).bold());
                println!("{}", translate(language, keys::TRY_ADJUSTING_FILTERS));
                return Ok(());
            }
            if !cli.quiet {
                println!(
                    "{}: {}  {}: {}",
                    translate(language, keys::TOTAL_CANDIDATES),
                    stats.count,
                    translate(language, keys::VISIBLE),
                    visible.len()
                );
                println!();
            }
            for card in &cards {
                print_card(card, language);
            }
        }
        OutputMode::Json => {
            let payload = json!({
                "command": "list",
                "language": language.tag(),
                "criteria": {
                    "search": model.criteria.search_text,
                    "party": model.criteria.party_filter.tag(),
                    "sort": model.criteria.sort_key.tag(),
                },
                "total": stats.count,
                "visible": visible.len(),
                "comparison": model.comparison.ids(),
                "candidates": serde_json::to_value(&cards)?,
            });
            write_json_line(&payload)?;
        }
    }
    Ok(())
}

fn print_card(card: &CardView, language: Language) {
    let marker = if card.compared { " [x]" } else { "" };
    println!(
        "#{:<4} {} ({}){}",
        card.id,
        card.name.bold(),
        card.party,
        marker.green()
    );
    println!("      {}: {}", translate(language, keys::CONSTITUENCY), card.constituency);
    println!(
        "      {}: {}  {}: {}",
        translate(language, keys::ASSETS),
        card.assets,
        translate(language, keys::LIABILITIES),
        card.liabilities
    );
    let cases = card.criminal_cases.to_string();
    println!(
        "      {}: {}  {}: {}",
        translate(language, keys::CRIMINAL_CASES),
        if card.has_criminal_cases { cases.red() } else { cases.normal() },
        translate(language, keys::EDUCATION),
        card.education
    );
    if !card.badges.is_empty() {
        let labels: Vec<&str> = card.badges.iter().map(|b| b.label.as_str()).collect();
        println!("      {}", labels.join(" · ").yellow());
    }
}

// ──────────────────── show ────────────────────

fn run_show(cli: &Cli, args: &ShowArgs) -> Result<(), CliError> {
    let mut session = start_session(cli)?;
    let language = session.model().language;
    require_candidate(session.model(), args.id)?;

    session.dispatch(SessionMsg::Navigate(Route::Detail(args.id)));
    if args.summary {
        session.dispatch(SessionMsg::OpenSummary(args.id));
    } else if args.cases {
        session.dispatch(SessionMsg::OpenCaseDetails(args.id));
    }

    let model = session.model();
    let record = require_candidate(model, args.id)?;
    let mode = output_mode(cli);

    match model.modal {
        Some(Modal::Summary(_)) => {
            let view = summary_view(record, language);
            match mode {
                OutputMode::Human => print_summary(&view, language),
                OutputMode::Json => write_json_line(&json!({
                    "command": "show",
                    "view": "summary",
                    "summary": serde_json::to_value(&view)?,
                }))?,
            }
        }
        Some(Modal::CaseDetails(_)) => {
            let section = case_section(record, language);
            match mode {
                OutputMode::Human => {
                    println!("{}", record.name.bold());
                    print_cases(&section, language);
                }
                OutputMode::Json => write_json_line(&json!({
                    "command": "show",
                    "view": "cases",
                    "id": record.id,
                    "cases": serde_json::to_value(&section)?,
                }))?,
            }
        }
        Some(Modal::Compare) | None => {
            let view = detail_view(record, model.stats(), language);
            match mode {
                OutputMode::Human => print_detail(&view, language),
                OutputMode::Json => write_json_line(&json!({
                    "command": "show",
                    "view": "detail",
                    "detail": serde_json::to_value(&view)?,
                }))?,
            }
        }
    }
    Ok(())
}

fn print_summary(view: &SummaryView, language: Language) {
    println!("{} - {}", translate(language, keys::QUICK_SUMMARY).bold(), view.name);
    if view.has_summary {
        println!("{}", view.text);
    } else {
        println!("{}", view.text.dimmed());
    }
}

fn print_detail(view: &DetailView, language: Language) {
    println!("{} ({})", view.name.bold(), view.party);
    println!("{}: {}", translate(language, keys::CONSTITUENCY), view.constituency);
    if !view.badges.is_empty() {
        let labels: Vec<&str> = view.badges.iter().map(|b| b.label.as_str()).collect();
        println!("{}", labels.join(" · ").yellow());
    }

    println!();
    println!("{}", translate(language, keys::OVERVIEW).bold());
    for row in &view.overview {
        println!("  {}: {}", row.label, row.value);
    }

    print_asset_section(&view.movable);
    print_asset_section(&view.immovable);

    println!();
    println!("{}", translate(language, keys::INCOME_HISTORY).bold());
    match &view.income_message {
        Some(message) => println!("  {}", message.dimmed()),
        None => {
            for point in &view.income {
                println!("  {}: {}", point.label, point.income);
            }
        }
    }

    println!();
    print_cases(&view.cases, language);

    if let Some(summary) = &view.summary {
        println!();
        println!("{}", translate(language, keys::QUICK_SUMMARY).bold());
        println!("  {summary}");
    }
    if let Some(url) = &view.affidavit_url {
        println!();
        println!("{}: {url}", translate(language, keys::VIEW_AFFIDAVIT));
    }
}

fn print_asset_section(section: &AssetSection) {
    println!();
    println!("{}", section.title.bold());
    if let Some(message) = &section.message {
        println!("  {}", message.dimmed());
        return;
    }
    for row in &section.rows {
        println!("  {}: {}", row.label, row.value);
    }
}

fn print_cases(section: &CaseSection, language: Language) {
    println!("{}", translate(language, keys::CRIMINAL_CASE_DETAILS).bold());
    if section.count > 0 {
        println!("  {}", section.summary.red());
    } else {
        println!("  {}", section.summary);
    }
    if let Some(message) = &section.empty_message {
        if section.count > 0 {
            println!("  {}", message.dimmed());
        }
        return;
    }
    for item in &section.items {
        println!("  {}: {}", item.title, item.charge);
    }
}

// ──────────────────── compare ────────────────────

fn run_compare(cli: &Cli, args: &CompareArgs) -> Result<(), CliError> {
    let mut session = start_session(cli)?;
    let ignored = select_for_comparison(cli, &mut session, &args.ids)?;
    let language = session.model().language;
    if !session.model().comparison.can_compare() {
        return Err(CliError::User(translate(language, keys::SELECT_AT_LEAST_2).to_string()));
    }

    session.dispatch(SessionMsg::OpenCompare);
    let model = session.model();
    if model.modal != Some(Modal::Compare) {
        return Err(CliError::Internal("comparison view did not open".to_string()));
    }
    let members = model.compared_records();
    let table = comparison_table(&members, language);

    match output_mode(cli) {
        OutputMode::Human => print_comparison(&table),
        OutputMode::Json => {
            let payload = json!({
                "command": "compare",
                "ids": model.comparison.ids(),
                "ignored": ignored,
                "table": serde_json::to_value(&table)?,
            });
            write_json_line(&payload)?;
        }
    }
    Ok(())
}

fn print_comparison(table: &ComparisonTable) {
    let label_width = table
        .rows
        .iter()
        .map(|row| row.label.chars().count())
        .max()
        .unwrap_or(0);
    let widths: Vec<usize> = table
        .columns
        .iter()
        .enumerate()
        .map(|(idx, column)| {
            table
                .rows
                .iter()
                .filter_map(|row| row.cells.get(idx))
                .map(|cell| cell.text.chars().count())
                .chain([column.name.chars().count(), column.party.chars().count()])
                .max()
                .unwrap_or(0)
        })
        .collect();

    println!("{}", table.title.bold());
    let pad = |text: &str, width: usize| {
        let fill = width.saturating_sub(text.chars().count());
        format!("{text}{}", " ".repeat(fill))
    };
    let header: Vec<String> = table
        .columns
        .iter()
        .zip(&widths)
        .map(|(column, &w)| pad(&column.name, w))
        .collect();
    println!("{}  {}", pad("", label_width), header.join(" | ").bold());
    let parties: Vec<String> = table
        .columns
        .iter()
        .zip(&widths)
        .map(|(column, &w)| pad(&column.party, w))
        .collect();
    println!("{}  {}", pad("", label_width), parties.join(" | "));

    for row in &table.rows {
        let cells: Vec<String> = row
            .cells
            .iter()
            .zip(&widths)
            .map(|(cell, &w)| pad(&cell.text, w))
            .collect();
        println!("{}  {}", pad(&row.label, label_width), cells.join(" | "));
    }

    let links: Vec<(&str, &str)> = table
        .columns
        .iter()
        .zip(table.rows.last().map(|row| row.cells.as_slice()).unwrap_or_default())
        .filter_map(|(column, cell)| cell.link.as_deref().map(|url| (column.name.as_str(), url)))
        .collect();
    if !links.is_empty() {
        println!();
        for (name, url) in links {
            println!("  {name}: {url}");
        }
    }
}

// ──────────────────── stats ────────────────────

fn run_stats(cli: &Cli, args: &StatsArgs) -> Result<(), CliError> {
    let mut session = start_session(cli)?;
    apply_criteria(&mut session, &args.criteria);
    select_for_comparison(cli, &mut session, &args.compare)?;

    let model = session.model();
    let view = stats_view(model.stats(), model.visible().len(), model.comparison.len());

    match output_mode(cli) {
        OutputMode::Human => print_stats(&view, model.language),
        OutputMode::Json => {
            let payload = json!({
                "command": "stats",
                "language": model.language.tag(),
                "stats": serde_json::to_value(&view)?,
            });
            write_json_line(&payload)?;
        }
    }
    Ok(())
}

fn print_stats(view: &StatsView, language: Language) {
    println!("{}: {}", translate(language, keys::TOTAL_CANDIDATES), view.total);
    println!("{}: {}", translate(language, keys::VISIBLE), view.visible);
    println!("{}: {}", translate(language, keys::AVERAGE_ASSETS), view.average_assets);
    println!(
        "{}: {}",
        translate(language, keys::CRIMINAL_CASES),
        view.with_criminal_cases
    );
    println!("{}: {}", translate(language, keys::COMPARE), view.compared);
}

// ──────────────────── lang ────────────────────

fn run_lang(cli: &Cli, args: &LangArgs) -> Result<(), CliError> {
    let config = load_config(cli)?;
    let command = args.command.clone().unwrap_or(LangCommand::Show);
    // A one-run override would mask the saved value being changed.
    let language_override = match command {
        LangCommand::Show => cli.lang,
        LangCommand::Set { .. } | LangCommand::Toggle => None,
    };
    let log = ActivityLog::open(&config.logging);
    let mut session = Session::with_log(&config, language_override, log);
    let before = session.model().language;

    let action = match command {
        LangCommand::Show => "lang show",
        LangCommand::Set { language } => {
            session.dispatch(SessionMsg::SetLocale(language));
            "lang set"
        }
        LangCommand::Toggle => {
            session.dispatch(SessionMsg::ToggleLocale);
            "lang toggle"
        }
    };

    let language = session.model().language;
    let changed = language != before;
    let saved = match preferences::load(session.preferences_file()) {
        PreferenceOutcome::Loaded { prefs, .. } => Some(prefs.language),
        PreferenceOutcome::Missing
        | PreferenceOutcome::Corrupt { .. }
        | PreferenceOutcome::IoError { .. } => None,
    };
    if changed && saved != Some(language) {
        return Err(CliError::Runtime(format!(
            "could not save language preference to {}",
            session.preferences_file().display()
        )));
    }

    match output_mode(cli) {
        OutputMode::Human => {
            println!("{} ({})", language.native_name().bold(), language.tag());
            if cli.verbose || action == "lang show" {
                println!("  source: {}", language_source_label(session.language_source()));
                println!("  file: {}", session.preferences_file().display());
            }
            if action != "lang show" && !changed && !cli.quiet {
                println!("  (unchanged)");
            }
        }
        OutputMode::Json => {
            let payload = json!({
                "command": action,
                "language": language.tag(),
                "changed": changed,
                "saved": saved.map(Language::tag),
                "source": language_source_label(session.language_source()),
                "preferences_file": session.preferences_file().to_string_lossy(),
            });
            write_json_line(&payload)?;
        }
    }
    Ok(())
}

// ──────────────────── share ────────────────────

fn run_share(cli: &Cli, args: &ShareArgs) -> Result<(), CliError> {
    let mut session = start_session(cli)?;
    let language = session.model().language;
    let channels = args.channel.map_or_else(|| ShareChannel::ALL.to_vec(), |c| vec![c]);

    let (links, text) = {
        let record = require_candidate(session.model(), args.id)?;
        let links: Vec<Result<ShareLink, SaarthiError>> = channels
            .iter()
            .map(|&channel| share_link(channel, record, language))
            .collect();
        (links, share_text(record, language))
    };

    let mut built = Vec::with_capacity(links.len());
    for (channel, link) in channels.iter().zip(links) {
        let mut entry = LogEntry::new(EventType::ShareLink, Severity::Info).with_candidate(args.id);
        entry.channel = Some(channel.tag().to_string());
        entry.language = Some(language.tag().to_string());
        match link {
            Ok(link) => {
                entry.ok = Some(true);
                session.activity_log().record(&entry);
                built.push(link);
            }
            Err(e) => {
                entry.severity = Severity::Error;
                entry.ok = Some(false);
                entry.error_code = Some(e.code().to_string());
                entry.details = Some(e.to_string());
                session.activity_log().record(&entry);
                session.activity_log().flush();
                return Err(e.into());
            }
        }
    }
    session.activity_log().flush();

    match output_mode(cli) {
        OutputMode::Human => {
            if args.text {
                println!("{text}");
                println!();
            }
            for link in &built {
                println!("{}: {}", link.channel.to_string().bold(), link.url);
            }
        }
        OutputMode::Json => {
            let mut payload = json!({
                "command": "share",
                "id": args.id,
                "language": language.tag(),
                "links": serde_json::to_value(&built)?,
            });
            if args.text {
                payload["text"] = Value::String(text);
            }
            write_json_line(&payload)?;
        }
    }
    Ok(())
}

// ──────────────────── config ────────────────────

fn run_config(cli: &Cli, args: &ConfigArgs) -> Result<(), CliError> {
    match &args.command {
        None | Some(ConfigCommand::Path) => {
            let path = cli.config.clone().unwrap_or_else(Config::default_path);
            let exists = path.exists();

            match output_mode(cli) {
                OutputMode::Human => {
                    println!("{}", path.display());
                    if !exists {
                        println!("  (file does not exist; defaults will be used)");
                    }
                }
                OutputMode::Json => {
                    let payload = json!({
                        "command": "config path",
                        "path": path.to_string_lossy(),
                        "exists": exists,
                    });
                    write_json_line(&payload)?;
                }
            }
            Ok(())
        }
        Some(ConfigCommand::Show) => {
            let config = load_config(cli)?;

            match output_mode(cli) {
                OutputMode::Human => {
                    let toml_str = toml::to_string_pretty(&config)
                        .map_err(|e| CliError::Runtime(format!("serialize config: {e}")))?;
                    println!("{toml_str}");
                }
                OutputMode::Json => {
                    let value = serde_json::to_value(&config)?;
                    let payload = json!({
                        "command": "config show",
                        "path": config.config_file.to_string_lossy(),
                        "config": value,
                    });
                    write_json_line(&payload)?;
                }
            }
            Ok(())
        }
    }
}

// ──────────────────── version ────────────────────

fn emit_version(cli: &Cli, args: &VersionArgs) -> Result<(), CliError> {
    let version = env!("CARGO_PKG_VERSION");
    let package = env!("CARGO_PKG_NAME");
    let target = option_env!("TARGET").unwrap_or("unknown");
    let profile = option_env!("PROFILE").unwrap_or("unknown");

    match output_mode(cli) {
        OutputMode::Human => {
            println!("saarthi {version}");
            if args.verbose {
                println!("package: {package}");
                println!("target: {target}");
                println!("profile: {profile}");
                println!(
                    "languages: {}",
                    Language::ALL.map(Language::tag).join(", ")
                );
            }
        }
        OutputMode::Json => {
            let payload = json!({
                "binary": "saarthi",
                "version": version,
                "package": package,
                "build": {
                    "target": target,
                    "profile": profile,
                },
                "languages": Language::ALL.map(Language::tag),
            });
            write_json_line(&payload)?;
        }
    }
    Ok(())
}

// ──────────────────── output ────────────────────

fn write_json_line(payload: &Value) -> Result<(), CliError> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer(&mut stdout, payload)?;
    writeln!(stdout)?;
    Ok(())
}

fn output_mode(cli: &Cli) -> OutputMode {
    let env_mode = std::env::var("SAARTHI_OUTPUT_FORMAT").ok();
    resolve_output_mode(cli.json, env_mode.as_deref(), io::stdout().is_terminal())
}

fn resolve_output_mode(json_flag: bool, env_mode: Option<&str>, stdout_is_tty: bool) -> OutputMode {
    if json_flag {
        return OutputMode::Json;
    }

    let fallback = if stdout_is_tty {
        OutputMode::Human
    } else {
        OutputMode::Json
    };

    match env_mode
        .map(str::trim)
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("json") => OutputMode::Json,
        Some("human") => OutputMode::Human,
        Some("auto") | None => fallback,
        Some(_) => fallback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_global_flags_before_and_after_subcommand() {
        let before = Cli::try_parse_from([
            "saarthi",
            "--config",
            "/tmp/saarthi.toml",
            "--data",
            "/tmp/candidates.json",
            "--lang",
            "hi",
            "--json",
            "--no-color",
            "-v",
            "list",
        ]);
        assert!(before.is_ok());

        let after = Cli::try_parse_from(["saarthi", "stats", "--json", "--no-color", "-q"]);
        assert!(after.is_ok());
    }

    #[test]
    fn parses_every_subcommand() {
        let cases = [
            vec!["saarthi", "list", "--search", "pune", "--party", "inc", "--sort", "assets-desc"],
            vec!["saarthi", "list", "--compare", "1,2,3", "--limit", "10"],
            vec!["saarthi", "show", "4"],
            vec!["saarthi", "show", "4", "--summary"],
            vec!["saarthi", "show", "4", "--cases"],
            vec!["saarthi", "compare", "1", "2", "3"],
            vec!["saarthi", "compare", "1,2"],
            vec!["saarthi", "stats", "--party", "bjp", "--compare", "1,2"],
            vec!["saarthi", "lang"],
            vec!["saarthi", "lang", "show"],
            vec!["saarthi", "lang", "set", "hi"],
            vec!["saarthi", "lang", "toggle"],
            vec!["saarthi", "share", "2", "--channel", "telegram", "--text"],
            vec!["saarthi", "config", "path"],
            vec!["saarthi", "config", "show"],
            vec!["saarthi", "version", "--verbose"],
        ];

        for case in cases {
            let parsed = Cli::try_parse_from(case.clone());
            assert!(parsed.is_ok(), "failed to parse case: {case:?}");
        }
    }

    #[test]
    fn rejects_bad_values() {
        assert!(Cli::try_parse_from(["saarthi", "--lang", "fr", "list"]).is_err());
        assert!(Cli::try_parse_from(["saarthi", "list", "--sort", "random"]).is_err());
        assert!(Cli::try_parse_from(["saarthi", "share", "1", "--channel", "sms"]).is_err());
        assert!(Cli::try_parse_from(["saarthi", "compare"]).is_err());
        assert!(Cli::try_parse_from(["saarthi", "show", "1", "--summary", "--cases"]).is_err());
        assert!(Cli::try_parse_from(["saarthi", "-v", "-q", "list"]).is_err());
    }

    #[test]
    fn unknown_party_tag_means_all() {
        let cli = Cli::try_parse_from(["saarthi", "list", "--party", "aap"]).unwrap();
        let Command::List(args) = cli.command else {
            panic!("expected list command");
        };
        assert_eq!(args.criteria.party, PartyFilter::All);
    }

    #[test]
    fn sort_accepts_aliases() {
        let cli = Cli::try_parse_from(["saarthi", "list", "--sort", "assets_desc"]).unwrap();
        let Command::List(args) = cli.command else {
            panic!("expected list command");
        };
        assert_eq!(args.criteria.sort, SortKey::AssetsDesc);
    }

    #[test]
    fn completions_support_bash_zsh_and_fish() {
        for shell in ["bash", "zsh", "fish"] {
            let parsed = Cli::try_parse_from(["saarthi", "completions", shell]);
            assert!(parsed.is_ok(), "failed shell parse for {shell}");
        }
    }

    #[test]
    fn output_mode_resolution_honors_precedence() {
        assert_eq!(
            resolve_output_mode(true, Some("human"), true),
            OutputMode::Json
        );
        assert_eq!(
            resolve_output_mode(false, Some("json"), true),
            OutputMode::Json
        );
        assert_eq!(
            resolve_output_mode(false, Some("human"), false),
            OutputMode::Human
        );
        assert_eq!(
            resolve_output_mode(false, Some("auto"), true),
            OutputMode::Human
        );
        assert_eq!(resolve_output_mode(false, None, false), OutputMode::Json);
    }

    #[test]
    fn exit_codes_follow_contract() {
        assert_eq!(CliError::User("x".into()).exit_code(), 1);
        assert_eq!(CliError::Runtime("x".into()).exit_code(), 2);
        assert_eq!(CliError::Internal("x".into()).exit_code(), 3);
    }

    #[test]
    fn library_errors_map_to_exit_classes() {
        let user: CliError = SaarthiError::UnknownCandidate { id: 9 }.into();
        assert_eq!(user.exit_code(), 1);
        let runtime: CliError = SaarthiError::io("/tmp/x", io::Error::other("boom")).into();
        assert_eq!(runtime.exit_code(), 2);
        let internal: CliError = SaarthiError::ShareLink {
            details: "bad".into(),
        }
        .into();
        assert_eq!(internal.exit_code(), 3);
    }
}
