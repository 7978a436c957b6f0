//! Command trait, registry, and the interpreter that dispatches to it.
//!
//! A raw line is split on `&&` into sub-commands that run strictly in
//! order, separated by the chain pause. Each sub-command is echoed with
//! the current prompt, parsed into a lower-cased name and a verbatim
//! argument string, and dispatched through the [`CommandRegistry`]. The
//! handler returns a [`CommandOutput`] script which the interpreter plays
//! back, awaiting animations and pauses as it goes. Failures are rendered
//! as lines; nothing a command does can abort the session.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use folio_content::{Block, ContentStore, FileSystem};
use folio_types::config::{ContentPolicy, FolioConfig};
use folio_types::error::{FolioError, Result};
use folio_types::{Language, Privilege, Style, StyledLine};
use tokio::sync::watch;

use crate::commands::register_builtins;
use crate::locale::{LANG_KEY, MemoryPreferences, PreferenceStore};
use crate::render::{LineRenderer, OutputSink};
use crate::session::Session;

/// Fixed brand art shown at boot, independent of the prompt hostname.
const LOGO: &[&str] = &[
    r"   ___   _  __ ______  ____  ______   _____   ___    ___   ____  ______  __  __",
    r"  / _ | / |/ //_  __/ /  _/ / ____/  / ___/  / _ \  / _ | / __/ /  _/ /_ \/ /",
    r" / __ |/    /  / /   _/ /  / / __   / / _   / , _/ / __ |/ _ \ _/ /  / / / /",
    r"/_/ |_/_/|_/  /_/   /___/ /_/ /_/  /_/ |_| /_/|_| /_/ |_/____//___/ /_/ /_/",
];

const BOOT_READY: &str = "ANTIGRABITY TERMINAL V1.0 INITIALIZED.";
const BOOT_HINT: &str = "TYPE 'help' FOR COMMANDS.";
const CONTENT_UNAVAILABLE: &str = "ERROR: CONTENT UNAVAILABLE.";

// ---------------------------------------------------------------------------
// Command output
// ---------------------------------------------------------------------------

/// One step of a command's observable behaviour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Append a line immediately.
    Line(StyledLine),
    /// Append a content block immediately.
    Block(Block),
    /// Type a line out at the typing cadence.
    Animated(StyledLine),
    /// Suspend before the next effect.
    Pause(Duration),
    /// Change the session privilege.
    SetPrivilege(Privilege),
    /// Change the session language (persisted, rebuilds content).
    SetLanguage(Language),
    /// Empty the output surface.
    Clear,
}

/// The ordered effects a command produces.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    effects: Vec<Effect>,
}

impl CommandOutput {
    /// No visible output.
    pub fn new() -> Self {
        Self::default()
    }

    /// Plain text, one line per row.
    pub fn text(text: &str) -> Self {
        text.lines()
            .fold(Self::new(), |out, line| out.line(line, Style::Plain))
    }

    pub fn line(self, text: impl Into<String>, style: Style) -> Self {
        self.then(Effect::Line(StyledLine::new(text, style)))
    }

    pub fn block(self, block: Block) -> Self {
        self.then(Effect::Block(block))
    }

    pub fn animated(self, text: impl Into<String>, style: Style) -> Self {
        self.then(Effect::Animated(StyledLine::new(text, style)))
    }

    pub fn pause(self, duration: Duration) -> Self {
        self.then(Effect::Pause(duration))
    }

    pub fn then(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn into_effects(self) -> Vec<Effect> {
        self.effects
    }
}

// ---------------------------------------------------------------------------
// Command trait
// ---------------------------------------------------------------------------

/// Read-only view of the interpreter handed to every command.
pub struct Environment<'a> {
    pub session: &'a Session,
    /// Content blocks for the current language and privilege. `None` when
    /// the content documents failed to load.
    pub files: Option<&'a FileSystem>,
    pub config: &'a FolioConfig,
}

impl Environment<'_> {
    /// The content blocks, or an error if content never loaded.
    pub fn files(&self) -> Result<&FileSystem> {
        self.files
            .ok_or_else(|| FolioError::Content("content unavailable".to_string()))
    }

    pub fn is_admin(&self) -> bool {
        self.session.privilege().is_admin()
    }

    /// Whether guests are denied project content.
    pub fn projects_locked(&self) -> bool {
        self.config.content_policy == ContentPolicy::Locked && !self.is_admin()
    }
}

/// A single executable command.
pub trait Command: Send + Sync {
    /// The command name (what the user types).
    fn name(&self) -> &str;

    /// Other names that dispatch to this command.
    fn aliases(&self) -> &[&str] {
        &[]
    }

    /// One-line description for `help`.
    fn description(&self) -> &str;

    /// Usage string (e.g. "view \[id\]").
    fn usage(&self) -> &str;

    /// Whether the command reads the content store. Such commands are
    /// refused when content failed to load.
    fn reads_content(&self) -> bool {
        false
    }

    /// Whether `help` should mark the command as locked for this viewer.
    fn locked_for(&self, _privilege: Privilege, _policy: ContentPolicy) -> bool {
        false
    }

    /// Produce the command's effects. Must not block.
    fn execute(&self, args: &str, env: &Environment<'_>) -> Result<CommandOutput>;
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// Registered commands, looked up by lower-cased name or alias.
#[derive(Default)]
pub struct CommandRegistry {
    commands: Vec<Arc<dyn Command>>,
    index: HashMap<String, usize>,
}

impl CommandRegistry {
    /// Create an empty command registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a command. Replaces any existing command with the same name.
    pub fn register(&mut self, cmd: Box<dyn Command>) {
        let cmd: Arc<dyn Command> = Arc::from(cmd);
        let slot = match self.index.get(&cmd.name().to_lowercase()) {
            Some(&slot) => {
                self.commands[slot] = Arc::clone(&cmd);
                self.index.retain(|_, s| *s != slot);
                slot
            },
            None => {
                self.commands.push(Arc::clone(&cmd));
                self.commands.len() - 1
            },
        };
        self.index.insert(cmd.name().to_lowercase(), slot);
        for alias in cmd.aliases() {
            self.index.insert(alias.to_lowercase(), slot);
        }
    }

    /// Look up a command by (already lower-cased) name or alias.
    pub fn resolve(&self, name: &str) -> Option<Arc<dyn Command>> {
        self.index
            .get(name)
            .map(|&slot| Arc::clone(&self.commands[slot]))
    }

    /// `(name, description)` pairs in registration order.
    pub fn list_commands(&self) -> Vec<(&str, &str)> {
        self.commands
            .iter()
            .map(|c| (c.name(), c.description()))
            .collect()
    }

    /// Built-in `help`: the command list, or details for one command.
    pub fn help(
        &self,
        topic: &str,
        privilege: Privilege,
        policy: ContentPolicy,
    ) -> Result<CommandOutput> {
        if !topic.is_empty() {
            let Some(cmd) = self.resolve(&topic.to_lowercase()) else {
                return Ok(CommandOutput::new()
                    .line(format!("UNKNOWN COMMAND: {topic}"), Style::Error));
            };
            let mut out = CommandOutput::new()
                .line(cmd.usage().to_string(), Style::Heading)
                .line(format!("  {}", cmd.description()), Style::Plain);
            if !cmd.aliases().is_empty() {
                out = out.line(format!("  ALIASES: {}", cmd.aliases().join(", ")), Style::Plain);
            }
            return Ok(out);
        }

        let mut out = CommandOutput::new()
            .line("AVAILABLE COMMANDS:", Style::Heading)
            .line("-------------------", Style::Plain);
        for cmd in &self.commands {
            let lock = if cmd.locked_for(privilege, policy) {
                " [LOCKED]"
            } else {
                ""
            };
            out = out.line(
                format!("{:<12}- {}{lock}", cmd.usage(), cmd.description()),
                Style::Plain,
            );
        }
        Ok(out)
    }
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// A parsed sub-command: lower-cased name plus verbatim argument string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    pub name: String,
    pub args: String,
}

impl ParsedCommand {
    /// Split on whitespace. The first token is lower-cased; the rest are
    /// re-joined with single spaces and keep their case.
    pub fn parse(raw: &str) -> Self {
        let mut tokens = raw.split_whitespace();
        let name = tokens.next().unwrap_or_default().to_lowercase();
        let args = tokens.collect::<Vec<_>>().join(" ");
        Self { name, args }
    }
}

/// Split a line on `&&`. Returns `None` when there is no separator,
/// otherwise the trimmed non-empty sub-commands in order.
pub fn split_chain(raw: &str) -> Option<Vec<&str>> {
    if !raw.contains("&&") {
        return None;
    }
    Some(
        raw.split("&&")
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect(),
    )
}

// ---------------------------------------------------------------------------
// Content source
// ---------------------------------------------------------------------------

/// Where the interpreter reads content from.
#[derive(Debug, Clone)]
pub enum ContentSource {
    /// A loaded store, shared with whoever may replace its project list.
    Ready(Arc<RwLock<ContentStore>>),
    /// Loading failed; the reason is shown once at boot.
    Failed(String),
}

impl ContentSource {
    pub fn ready(store: ContentStore) -> Self {
        ContentSource::Ready(Arc::new(RwLock::new(store)))
    }

    /// Wrap the outcome of [`ContentStore::load`].
    pub fn from_load(result: Result<ContentStore>) -> Self {
        match result {
            Ok(store) => Self::ready(store),
            Err(e) => {
                log::error!("Content initialization failed: {e}");
                ContentSource::Failed(e.to_string())
            },
        }
    }

    /// The load failure, if any.
    pub fn failure(&self) -> Option<&str> {
        match self {
            ContentSource::Ready(_) => None,
            ContentSource::Failed(reason) => Some(reason),
        }
    }
}

/// File system built for one (language, privilege, revision) triple.
struct CachedFiles {
    key: (Language, Privilege, u64),
    files: FileSystem,
}

// ---------------------------------------------------------------------------
// Interpreter
// ---------------------------------------------------------------------------

/// Owns the session and runs commands against it.
pub struct Interpreter<S> {
    session: Session,
    registry: CommandRegistry,
    renderer: LineRenderer<S>,
    content: ContentSource,
    files: Option<CachedFiles>,
    config: FolioConfig,
    preferences: Box<dyn PreferenceStore>,
    session_tx: watch::Sender<Session>,
}

impl<S: OutputSink> Interpreter<S> {
    /// An interpreter with the built-in commands registered and a guest
    /// session in `language`.
    pub fn new(config: FolioConfig, content: ContentSource, sink: S, language: Language) -> Self {
        let session = Session::new(language);
        let (session_tx, _) = watch::channel(session);
        let mut registry = CommandRegistry::new();
        register_builtins(&mut registry);
        Self {
            session,
            registry,
            renderer: LineRenderer::new(sink, config.typing_delay()),
            content,
            files: None,
            config,
            preferences: Box::new(MemoryPreferences::new()),
            session_tx,
        }
    }

    /// Use `store` to persist language switches.
    pub fn with_preferences(mut self, store: Box<dyn PreferenceStore>) -> Self {
        self.preferences = store;
        self
    }

    pub fn session(&self) -> Session {
        self.session
    }

    /// Watch session changes from another task.
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.session_tx.subscribe()
    }

    pub fn config(&self) -> &FolioConfig {
        &self.config
    }

    pub fn registry_mut(&mut self) -> &mut CommandRegistry {
        &mut self.registry
    }

    pub fn sink(&self) -> &S {
        self.renderer.sink()
    }

    pub fn into_sink(self) -> S {
        self.renderer.into_sink()
    }

    /// Print the banner and report a content load failure, once.
    pub async fn boot(&mut self) {
        if self.config.boot_sequence {
            for row in LOGO {
                self.renderer.line(&StyledLine::new(*row, Style::Heading));
            }
            self.renderer.line(&StyledLine::plain(""));
            self.renderer.animate(&StyledLine::plain(BOOT_READY)).await;
            self.renderer.animate(&StyledLine::plain(BOOT_HINT)).await;
        }
        if let Some(reason) = self.content.failure() {
            let line = format!("FATAL: CONTENT INITIALIZATION FAILED ({reason})");
            self.renderer.line(&StyledLine::new(line, Style::Error));
        }
    }

    /// Run one submitted line, chained sub-commands included.
    pub async fn execute_line(&mut self, raw: &str) {
        match split_chain(raw) {
            // Separators only: still echoed, then a no-op.
            Some(parts) if parts.is_empty() => self.dispatch(raw).await,
            Some(parts) => {
                for (i, part) in parts.into_iter().enumerate() {
                    if i > 0 {
                        tokio::time::sleep(self.config.chain_pause()).await;
                    }
                    self.dispatch(part).await;
                }
            },
            None => self.dispatch(raw).await,
        }
    }

    async fn dispatch(&mut self, raw: &str) {
        let echo = format!("{}{raw}", self.session.prompt(&self.config.hostname));
        self.renderer.line(&StyledLine::new(echo, Style::Prompt));

        let parsed = ParsedCommand::parse(raw);
        if parsed.name.is_empty() {
            return;
        }
        log::debug!("Dispatch '{}' args='{}'", parsed.name, parsed.args);
        let output = self.run(&parsed);
        self.play(output).await;
    }

    fn run(&mut self, parsed: &ParsedCommand) -> CommandOutput {
        let result = if parsed.name == "help" {
            self.registry.help(
                &parsed.args,
                self.session.privilege(),
                self.config.content_policy,
            )
        } else {
            let Some(cmd) = self.registry.resolve(&parsed.name) else {
                return CommandOutput::new().line(
                    format!(
                        "Command not found: {}. Type 'help' for assistance.",
                        parsed.name
                    ),
                    Style::Error,
                );
            };
            if cmd.reads_content() && self.content.failure().is_some() {
                return CommandOutput::new().line(CONTENT_UNAVAILABLE, Style::Error);
            }
            self.refresh_files();
            let env = Environment {
                session: &self.session,
                files: self.files.as_ref().map(|c| &c.files),
                config: &self.config,
            };
            cmd.execute(&parsed.args, &env)
        };
        result.unwrap_or_else(|e| {
            log::warn!("Command '{}' failed: {e}", parsed.name);
            CommandOutput::new().line(e.to_string(), Style::Error)
        })
    }

    async fn play(&mut self, output: CommandOutput) {
        for effect in output.into_effects() {
            match effect {
                Effect::Line(line) => self.renderer.render(&line, false).await,
                Effect::Block(block) => self.renderer.block(&block),
                Effect::Animated(line) => self.renderer.render(&line, true).await,
                Effect::Pause(duration) => tokio::time::sleep(duration).await,
                Effect::SetPrivilege(privilege) => {
                    self.session.set_privilege(privilege);
                    self.session_tx.send_replace(self.session);
                },
                Effect::SetLanguage(language) => {
                    self.session.set_language(language);
                    if let Err(e) = self.preferences.set(LANG_KEY, language.code()) {
                        log::warn!("Could not persist language preference: {e}");
                    }
                    self.session_tx.send_replace(self.session);
                },
                Effect::Clear => self.renderer.clear(),
            }
        }
    }

    /// Rebuild the file system if language, privilege or the project list
    /// changed since it was last built.
    fn refresh_files(&mut self) {
        let ContentSource::Ready(store) = &self.content else {
            return;
        };
        let store = store.read().unwrap_or_else(PoisonError::into_inner);
        let key = (
            self.session.language(),
            self.session.privilege(),
            store.revision(),
        );
        if self.files.as_ref().is_some_and(|c| c.key == key) {
            return;
        }
        log::debug!("Building file system for {:?}", key);
        self.files = Some(CachedFiles {
            key,
            files: store.build_file_system(key.0, key.1),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::FilePreferences;
    use crate::render::BufferSink;
    use folio_content::{ProjectRecord, TranslationTable};
    use proptest::prelude::*;
    use tokio::time::Instant;

    const TRANSLATIONS: &str = r#"{
        "en": {"about.role": "Lead Frontend Engineer"},
        "ja": {"about.role": "リードフロントエンドエンジニア", "about.identify": "反重力エージェント"}
    }"#;

    const PROJECTS: &str = r#"[
        {"id": "project-one", "title": "PROJECT_ONE",
         "brief": "A specialized interface for encrypted communication.",
         "i18n": {"ja": {"title": "プロジェクト・ワン"}}},
        {"id": "project-two", "title": "PROJECT_TWO", "brief": "Data visualization."},
        {"id": "project-three", "title": "PROJECT_THREE", "brief": "Drone swarms."}
    ]"#;

    const PROMPT: &str = "guest@antigrabity:~$ ";
    const ADMIN_PROMPT: &str = "admin@antigrabity:~$ ";

    fn content() -> ContentSource {
        ContentSource::ready(ContentStore::from_json(TRANSLATIONS, PROJECTS).unwrap())
    }

    fn config(policy: ContentPolicy) -> FolioConfig {
        FolioConfig {
            content_policy: policy,
            ..FolioConfig::default()
        }
    }

    fn interpreter() -> Interpreter<BufferSink> {
        Interpreter::new(
            config(ContentPolicy::Open),
            content(),
            BufferSink::new(),
            Language::En,
        )
    }

    fn locked() -> Interpreter<BufferSink> {
        Interpreter::new(
            config(ContentPolicy::Locked),
            content(),
            BufferSink::new(),
            Language::En,
        )
    }

    fn texts(interp: &Interpreter<BufferSink>) -> Vec<String> {
        interp.sink().texts().into_iter().map(String::from).collect()
    }

    /// Output of one command with the output surface cleared first.
    async fn output_of(interp: &mut Interpreter<BufferSink>, line: &str) -> Vec<StyledLine> {
        interp.renderer.clear();
        interp.execute_line(line).await;
        interp.sink().lines().to_vec()
    }

    // -- parsing --

    #[test]
    fn parse_lowercases_name_only() {
        let parsed = ParsedCommand::parse("  VIEW   Project-One  extra ");
        assert_eq!(parsed.name, "view");
        assert_eq!(parsed.args, "Project-One extra");
    }

    #[test]
    fn parse_empty() {
        let parsed = ParsedCommand::parse("   ");
        assert!(parsed.name.is_empty());
        assert!(parsed.args.is_empty());
    }

    #[test]
    fn chain_splitting() {
        assert_eq!(split_chain("about"), None);
        assert_eq!(
            split_chain(" about &&contact&&  && view x "),
            Some(vec!["about", "contact", "view x"])
        );
        assert_eq!(split_chain("&&"), Some(vec![]));
    }

    // -- registry --

    struct Echo;
    impl Command for Echo {
        fn name(&self) -> &str {
            "echo"
        }
        fn aliases(&self) -> &[&str] {
            &["say"]
        }
        fn description(&self) -> &str {
            "Print arguments"
        }
        fn usage(&self) -> &str {
            "echo [text]"
        }
        fn execute(&self, args: &str, _env: &Environment<'_>) -> Result<CommandOutput> {
            Ok(CommandOutput::text(args))
        }
    }

    #[test]
    fn register_and_resolve_alias() {
        let mut reg = CommandRegistry::new();
        reg.register(Box::new(Echo));
        assert_eq!(reg.resolve("echo").unwrap().name(), "echo");
        assert_eq!(reg.resolve("say").unwrap().name(), "echo");
        assert!(reg.resolve("nope").is_none());
    }

    #[test]
    fn reregister_replaces_in_place() {
        let mut reg = CommandRegistry::new();
        reg.register(Box::new(Echo));
        reg.register(Box::new(Echo));
        assert_eq!(reg.list_commands().len(), 1);
    }

    #[test]
    fn help_topic_unknown_is_reported() {
        let reg = CommandRegistry::new();
        let out = reg
            .help("nope", Privilege::Guest, ContentPolicy::Open)
            .unwrap();
        assert_eq!(
            out.into_effects(),
            vec![Effect::Line(StyledLine::new("UNKNOWN COMMAND: nope", Style::Error))]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn help_topic_shows_usage() {
        let mut interp = interpreter();
        let out = output_of(&mut interp, "help LS").await;
        assert_eq!(out[1], StyledLine::new("projects", Style::Heading));
        assert!(out.iter().any(|l| l.text == "  ALIASES: ls"));
        let out = output_of(&mut interp, "help bogus").await;
        assert_eq!(out[1].text, "UNKNOWN COMMAND: bogus");
    }

    #[tokio::test(start_paused = true)]
    async fn custom_command_runs_through_interpreter() {
        let mut interp = interpreter();
        interp.registry_mut().register(Box::new(Echo));
        interp.execute_line("SAY Hello World").await;
        assert_eq!(texts(&interp), vec![format!("{PROMPT}SAY Hello World"), "Hello World".into()]);
    }

    // -- echo, empty, unknown --

    #[tokio::test(start_paused = true)]
    async fn empty_line_only_echoes() {
        let mut interp = interpreter();
        interp.execute_line("").await;
        assert_eq!(texts(&interp), vec![PROMPT.to_string()]);
        assert_eq!(interp.sink().lines()[0].style, Style::Prompt);
    }

    #[tokio::test(start_paused = true)]
    async fn unknown_command_reported_lowercased() {
        let mut interp = interpreter();
        interp.execute_line("FooBar baz").await;
        assert_eq!(
            texts(&interp),
            vec![
                format!("{PROMPT}FooBar baz"),
                "Command not found: foobar. Type 'help' for assistance.".to_string(),
            ]
        );
        assert_eq!(interp.session().privilege(), Privilege::Guest);
    }

    #[tokio::test(start_paused = true)]
    async fn separator_only_line_still_echoes() {
        for line in ["&&", " && ", "&& &&"] {
            let mut interp = interpreter();
            interp.execute_line(line).await;
            assert_eq!(texts(&interp), vec![format!("{PROMPT}{line}")], "{line:?}");
        }
    }

    // -- help --

    #[tokio::test(start_paused = true)]
    async fn help_as_guest_marks_locked_entries() {
        let mut interp = interpreter();
        interp.execute_line("help").await;
        let out = texts(&interp);
        assert_eq!(out[0], format!("{PROMPT}help"));
        assert_eq!(out[1], "AVAILABLE COMMANDS:");
        let contact = out.iter().find(|l| l.starts_with("contact")).unwrap();
        assert!(contact.ends_with("[LOCKED]"));
        let about = out.iter().find(|l| l.starts_with("about")).unwrap();
        assert!(!about.contains("[LOCKED]"));
        assert!(out.iter().any(|l| l.starts_with("view [id]   - ")));
    }

    #[tokio::test(start_paused = true)]
    async fn help_as_admin_has_no_locks() {
        let mut interp = locked();
        interp.execute_line("admin").await;
        let out = output_of(&mut interp, "help").await;
        assert!(out.iter().all(|l| !l.text.contains("[LOCKED]")));
    }

    #[tokio::test(start_paused = true)]
    async fn locked_policy_marks_projects_and_view() {
        let mut interp = locked();
        let out = output_of(&mut interp, "help").await;
        let locked: Vec<_> = out
            .iter()
            .filter(|l| l.text.ends_with("[LOCKED]"))
            .map(|l| l.text.split_whitespace().next().unwrap_or_default().to_string())
            .collect();
        assert_eq!(locked, vec!["projects", "contact", "view"]);
    }

    // -- view --

    #[tokio::test(start_paused = true)]
    async fn view_project_open_policy() {
        let mut interp = interpreter();
        let out = output_of(&mut interp, "view project-one").await;
        assert_eq!(out[1], StyledLine::new("PROJECT_ONE", Style::Heading));
        assert_eq!(out[2].text, "-------------------------");
        assert_eq!(
            out[3].text,
            "A specialized interface for encrypted communication."
        );
    }

    #[tokio::test(start_paused = true)]
    async fn view_project_locked_policy_denies_guest() {
        let mut interp = locked();
        let out = output_of(&mut interp, "view project-one").await;
        assert_eq!(out.len(), 2);
        assert_eq!(
            out[1].text,
            "ACCESS DENIED: OBJECT 'project-one' REQUIRES AUTHORIZATION."
        );
    }

    #[tokio::test(start_paused = true)]
    async fn view_without_argument_is_not_found() {
        let mut interp = interpreter();
        let out = output_of(&mut interp, "view").await;
        assert_eq!(out[1].text, "Error: Object '' not found.");
    }

    #[tokio::test(start_paused = true)]
    async fn view_id_is_case_sensitive() {
        let mut interp = interpreter();
        let out = output_of(&mut interp, "VIEW PROJECT-ONE").await;
        assert_eq!(out[1].text, "Error: Object 'PROJECT-ONE' not found.");
    }

    #[tokio::test(start_paused = true)]
    async fn view_contact_admin_hidden_from_guest() {
        let mut interp = interpreter();
        let out = output_of(&mut interp, "view contact_admin").await;
        assert_eq!(out[1].text, "Error: Object 'contact_admin' not found.");
    }

    proptest! {
        #[test]
        fn view_unknown_id_not_found(id in "[a-z0-9_-]{1,16}") {
            prop_assume!(!["about", "contact", "contact_admin"].contains(&id.as_str()));
            prop_assume!(!id.starts_with("project-"));
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_time()
                .start_paused(true)
                .build()
                .unwrap();
            rt.block_on(async {
                let mut interp = interpreter();
                interp.execute_line(&format!("view {id}")).await;
                let out = texts(&interp);
                prop_assert_eq!(out.len(), 2);
                prop_assert_eq!(&out[1], &format!("Error: Object '{id}' not found."));
                prop_assert_eq!(interp.session().privilege(), Privilege::Guest);
                Ok(())
            })?;
        }
    }

    // -- admin / exit --

    #[tokio::test(start_paused = true)]
    async fn admin_grants_after_delay() {
        let mut interp = interpreter();
        let start = Instant::now();
        interp.execute_line("admin").await;
        assert!(start.elapsed() >= Duration::from_millis(1000));
        assert_eq!(interp.session().privilege(), Privilege::Admin);
        assert_eq!(
            texts(&interp),
            vec![
                format!("{PROMPT}admin"),
                "AUTHENTICATING...".to_string(),
                String::new(),
                "ACCESS GRANTED. WELCOME, ADMIN.".to_string(),
            ]
        );

        let out = output_of(&mut interp, "contact").await;
        assert_eq!(out[0].text, format!("{ADMIN_PROMPT}contact"));
        assert!(out.iter().any(|l| l.text.contains("guest@antigrabity.io")));
        assert!(out.iter().any(|l| l.text.contains("github.com/antigrabity")));
        assert!(out.iter().all(|l| !l.text.contains("REDACTED")));
    }

    #[tokio::test(start_paused = true)]
    async fn admin_twice_is_already_authenticated() {
        let mut interp = interpreter();
        interp.execute_line("admin").await;
        let start = Instant::now();
        let out = output_of(&mut interp, "admin").await;
        assert_eq!(start.elapsed(), Duration::ZERO);
        assert_eq!(out[1].text, "ALREADY AUTHENTICATED AS ADMIN.");
        assert_eq!(interp.session().privilege(), Privilege::Admin);
    }

    #[tokio::test(start_paused = true)]
    async fn exit_as_guest() {
        let mut interp = interpreter();
        let out = output_of(&mut interp, "logout").await;
        assert_eq!(out[1].text, "ALREADY IN GUEST MODE.");
    }

    #[tokio::test(start_paused = true)]
    async fn admin_then_exit_restores_guest_views() {
        for policy in [ContentPolicy::Open, ContentPolicy::Locked] {
            let mut interp = Interpreter::new(
                config(policy),
                content(),
                BufferSink::new(),
                Language::En,
            );
            let contact_before = output_of(&mut interp, "contact").await;
            let view_before = output_of(&mut interp, "view project-two").await;

            interp.execute_line("admin").await;
            let out = output_of(&mut interp, "exit").await;
            assert_eq!(out[0].text, format!("{ADMIN_PROMPT}exit"));
            assert_eq!(out[1].text, "LOGGING OUT... SESSION TERMINATED.");
            assert_eq!(interp.session().privilege(), Privilege::Guest);

            assert_eq!(output_of(&mut interp, "contact").await, contact_before);
            assert_eq!(output_of(&mut interp, "view project-two").await, view_before);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn watchers_see_privilege_changes() {
        let mut interp = interpreter();
        let rx = interp.subscribe();
        interp.execute_line("admin").await;
        assert_eq!(rx.borrow().privilege(), Privilege::Admin);
    }

    // -- listing, about, contact --

    #[tokio::test(start_paused = true)]
    async fn projects_listing_open() {
        let mut interp = interpreter();
        let out = output_of(&mut interp, "ls").await;
        let out: Vec<_> = out.into_iter().map(|l| l.text).collect();
        assert_eq!(
            out[1..],
            [
                "PROJECTS LOCATED IN MAIN MEMORY:",
                "- PROJECT_ONE (project-one)",
                "- PROJECT_TWO (project-two)",
                "- PROJECT_THREE (project-three)",
                "USE 'view [project-id]' FOR DETAILS OR SCROLL UP.",
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn projects_listing_locked_is_redacted() {
        let mut interp = locked();
        let out = output_of(&mut interp, "projects").await;
        assert!(out.iter().all(|l| !l.text.contains("project-")));
        assert!(out.iter().any(|l| l.text.contains("ACCESS DENIED")));

        interp.execute_line("admin").await;
        let out = output_of(&mut interp, "projects").await;
        assert!(out.iter().any(|l| l.text == "- PROJECT_ONE (project-one)"));
    }

    #[tokio::test(start_paused = true)]
    async fn about_and_whoami_match() {
        let mut interp = interpreter();
        let about = output_of(&mut interp, "about").await;
        let whoami = output_of(&mut interp, "whoami").await;
        assert_eq!(about[1..], whoami[1..]);
        assert!(about.iter().any(|l| l.text.contains("Lead Frontend Engineer")));
    }

    #[tokio::test(start_paused = true)]
    async fn guest_contact_is_redacted() {
        let mut interp = interpreter();
        let out = output_of(&mut interp, "contact").await;
        assert!(
            out.iter()
                .any(|l| l.text == "CONTACT INFO REDACTED. AUTHORIZATION REQUIRED.")
        );
        assert!(out.iter().all(|l| !l.text.contains('@') || l.style == Style::Prompt));
    }

    // -- clear --

    #[tokio::test(start_paused = true)]
    async fn clear_is_idempotent() {
        let mut interp = interpreter();
        interp.boot().await;
        interp.execute_line("about").await;
        interp.execute_line("clear").await;
        let once = texts(&interp);
        interp.execute_line("clear").await;
        assert_eq!(texts(&interp), once);
        assert!(once.is_empty());
    }

    // -- chains --

    #[tokio::test(start_paused = true)]
    async fn chain_runs_in_order_with_pause() {
        let mut interp = interpreter();
        let about = output_of(&mut interp, "about").await;
        let contact = output_of(&mut interp, "contact").await;

        interp.renderer.clear();
        let start = Instant::now();
        interp.execute_line("about && contact").await;
        assert!(start.elapsed() >= Duration::from_millis(300));

        let mut expected = about;
        expected.extend(contact);
        assert_eq!(interp.sink().lines(), expected.as_slice());
    }

    #[tokio::test(start_paused = true)]
    async fn chain_observes_earlier_mutation() {
        let mut interp = interpreter();
        interp.execute_line("admin && contact").await;
        let out = texts(&interp);
        assert!(out.contains(&format!("{ADMIN_PROMPT}contact")));
        assert!(out.iter().any(|l| l.contains("guest@antigrabity.io")));
    }

    // -- language --

    #[tokio::test(start_paused = true)]
    async fn language_round_trip_is_stable() {
        let mut interp = interpreter();
        let en = output_of(&mut interp, "about").await;
        interp.execute_line("lang ja").await;
        assert_eq!(interp.session().language(), Language::Ja);
        let ja = output_of(&mut interp, "about").await;
        assert_ne!(en, ja);
        assert!(ja.iter().any(|l| l.text.contains("反重力エージェント")));
        interp.execute_line("lang EN").await;
        assert_eq!(output_of(&mut interp, "about").await, en);
    }

    #[tokio::test(start_paused = true)]
    async fn lang_switch_localizes_projects() {
        let mut interp = interpreter();
        interp.execute_line("lang ja").await;
        let out = output_of(&mut interp, "view project-one").await;
        assert_eq!(out[1].text, "プロジェクト・ワン");
        let out = output_of(&mut interp, "view project-two").await;
        assert_eq!(out[1].text, "PROJECT_TWO");
    }

    #[tokio::test(start_paused = true)]
    async fn unknown_lang_falls_back_to_default() {
        let mut interp = interpreter();
        interp.execute_line("lang ja").await;
        let out = output_of(&mut interp, "lang klingon").await;
        assert_eq!(interp.session().language(), Language::En);
        assert!(out.iter().any(|l| l.text == "LANGUAGE SET: EN"));
    }

    #[tokio::test(start_paused = true)]
    async fn lang_without_args_reports_current() {
        let mut interp = interpreter();
        let out = output_of(&mut interp, "lang").await;
        assert_eq!(out[1].text, "LANGUAGE: EN");
        assert_eq!(out[2].text, "AVAILABLE: EN, JA");
    }

    #[tokio::test(start_paused = true)]
    async fn lang_switch_is_persisted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.json");
        let prefs = FilePreferences::open(&path).unwrap();
        let mut interp = interpreter().with_preferences(Box::new(prefs));
        interp.execute_line("lang ja").await;
        let reopened = FilePreferences::open(&path).unwrap();
        assert_eq!(reopened.get(LANG_KEY).as_deref(), Some("ja"));
    }

    // -- content store changes and failures --

    #[tokio::test(start_paused = true)]
    async fn replaced_projects_are_picked_up() {
        let source = content();
        let ContentSource::Ready(store) = &source else {
            unreachable!()
        };
        let store = Arc::clone(store);
        let mut interp = Interpreter::new(
            config(ContentPolicy::Open),
            source,
            BufferSink::new(),
            Language::En,
        );
        interp.execute_line("ls").await;

        let mut fresh = ProjectRecord::new("project-four");
        fresh.title = "PROJECT_FOUR".into();
        store.write().unwrap().replace_projects(vec![fresh]);

        let out = output_of(&mut interp, "ls").await;
        assert!(out.iter().any(|l| l.text == "- PROJECT_FOUR (project-four)"));
        assert!(out.iter().all(|l| !l.text.contains("project-one")));
    }

    #[tokio::test(start_paused = true)]
    async fn failed_content_reports_once_and_refuses_content_commands() {
        let source = ContentSource::from_load(Err(FolioError::Content("missing".into())));
        let mut interp = Interpreter::new(
            config(ContentPolicy::Open),
            source,
            BufferSink::new(),
            Language::En,
        );
        interp.boot().await;
        let fatal: Vec<_> = texts(&interp)
            .into_iter()
            .filter(|l| l.starts_with("FATAL:"))
            .collect();
        assert_eq!(
            fatal,
            vec!["FATAL: CONTENT INITIALIZATION FAILED (content error: missing)"]
        );

        for cmd in ["about", "contact", "ls", "projects", "view project-one"] {
            let out = output_of(&mut interp, cmd).await;
            assert_eq!(out[1].text, CONTENT_UNAVAILABLE, "{cmd}");
        }
        let out = output_of(&mut interp, "help").await;
        assert_eq!(out[1].text, "AVAILABLE COMMANDS:");
        interp.execute_line("admin").await;
        assert_eq!(interp.session().privilege(), Privilege::Admin);
    }

    #[tokio::test(start_paused = true)]
    async fn banner_ignores_hostname() {
        let config = FolioConfig {
            hostname: "box".into(),
            ..FolioConfig::default()
        };
        let mut interp = Interpreter::new(config, content(), BufferSink::new(), Language::En);
        interp.boot().await;
        let out = texts(&interp);
        assert!(out.contains(&BOOT_READY.to_string()));
        assert!(out.iter().all(|l| !l.contains("BOX")));
        interp.execute_line("").await;
        assert_eq!(texts(&interp).last().unwrap(), "guest@box:~$ ");
    }

    #[tokio::test(start_paused = true)]
    async fn boot_prints_banner() {
        let mut interp = interpreter();
        interp.boot().await;
        let out = texts(&interp);
        assert!(out.contains(&"ANTIGRABITY TERMINAL V1.0 INITIALIZED.".to_string()));
        assert_eq!(out.last().unwrap(), BOOT_HINT);
    }

    #[test]
    fn empty_store_builds() {
        let store = ContentStore::new(TranslationTable::new(), Vec::new());
        let files = store.build_file_system(Language::En, Privilege::Guest);
        assert!(files.projects().is_empty());
    }
}
