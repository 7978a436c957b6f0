//! Built-in portfolio commands.

use folio_content::ContentKey;
use folio_types::config::ContentPolicy;
use folio_types::error::Result;
use folio_types::{Language, Privilege, Style};

use crate::interpreter::{Command, CommandOutput, CommandRegistry, Effect, Environment};

/// Register all built-in commands, in the order `help` lists them.
pub fn register_builtins(reg: &mut CommandRegistry) {
    reg.register(Box::new(AboutCmd));
    reg.register(Box::new(ProjectsCmd));
    reg.register(Box::new(ContactCmd));
    reg.register(Box::new(ClearCmd));
    reg.register(Box::new(AdminCmd));
    reg.register(Box::new(ExitCmd));
    reg.register(Box::new(ViewCmd));
    reg.register(Box::new(LangCmd));
}

fn projects_gated(privilege: Privilege, policy: ContentPolicy) -> bool {
    policy == ContentPolicy::Locked && !privilege.is_admin()
}

// ---------------------------------------------------------------------------
// about
// ---------------------------------------------------------------------------

struct AboutCmd;
impl Command for AboutCmd {
    fn name(&self) -> &str {
        "about"
    }
    fn aliases(&self) -> &[&str] {
        &["whoami"]
    }
    fn description(&self) -> &str {
        "View user identity"
    }
    fn usage(&self) -> &str {
        "about"
    }
    fn reads_content(&self) -> bool {
        true
    }
    fn execute(&self, _args: &str, env: &Environment<'_>) -> Result<CommandOutput> {
        Ok(CommandOutput::new().block(env.files()?.about().clone()))
    }
}

// ---------------------------------------------------------------------------
// projects / ls
// ---------------------------------------------------------------------------

struct ProjectsCmd;
impl Command for ProjectsCmd {
    fn name(&self) -> &str {
        "projects"
    }
    fn aliases(&self) -> &[&str] {
        &["ls"]
    }
    fn description(&self) -> &str {
        "List projects"
    }
    fn usage(&self) -> &str {
        "projects"
    }
    fn reads_content(&self) -> bool {
        true
    }
    fn locked_for(&self, privilege: Privilege, policy: ContentPolicy) -> bool {
        projects_gated(privilege, policy)
    }
    fn execute(&self, _args: &str, env: &Environment<'_>) -> Result<CommandOutput> {
        let files = env.files()?;
        let out = CommandOutput::new().line("PROJECTS LOCATED IN MAIN MEMORY:", Style::Heading);
        if env.projects_locked() {
            return Ok(out
                .line("[REDACTED]", Style::Error)
                .line("ACCESS DENIED. AUTHORIZATION REQUIRED.", Style::Error));
        }
        let out = files.projects().iter().fold(out, |out, p| {
            out.line(format!("- {} ({})", p.title, p.id), Style::Plain)
        });
        Ok(out.line(
            "USE 'view [project-id]' FOR DETAILS OR SCROLL UP.",
            Style::Plain,
        ))
    }
}

// ---------------------------------------------------------------------------
// contact
// ---------------------------------------------------------------------------

struct ContactCmd;
impl Command for ContactCmd {
    fn name(&self) -> &str {
        "contact"
    }
    fn description(&self) -> &str {
        "Establish communication"
    }
    fn usage(&self) -> &str {
        "contact"
    }
    fn reads_content(&self) -> bool {
        true
    }
    fn locked_for(&self, privilege: Privilege, _policy: ContentPolicy) -> bool {
        !privilege.is_admin()
    }
    fn execute(&self, _args: &str, env: &Environment<'_>) -> Result<CommandOutput> {
        let files = env.files()?;
        let key = if env.is_admin() {
            ContentKey::ContactAdmin
        } else {
            ContentKey::Contact
        };
        let block = files.lookup(&key).unwrap_or(files.contact());
        Ok(CommandOutput::new().block(block.clone()))
    }
}

// ---------------------------------------------------------------------------
// clear
// ---------------------------------------------------------------------------

struct ClearCmd;
impl Command for ClearCmd {
    fn name(&self) -> &str {
        "clear"
    }
    fn description(&self) -> &str {
        "Clear terminal screen"
    }
    fn usage(&self) -> &str {
        "clear"
    }
    fn execute(&self, _args: &str, _env: &Environment<'_>) -> Result<CommandOutput> {
        Ok(CommandOutput::new().then(Effect::Clear))
    }
}

// ---------------------------------------------------------------------------
// admin
// ---------------------------------------------------------------------------

struct AdminCmd;
impl Command for AdminCmd {
    fn name(&self) -> &str {
        "admin"
    }
    fn description(&self) -> &str {
        "Request root access"
    }
    fn usage(&self) -> &str {
        "admin"
    }
    fn execute(&self, _args: &str, env: &Environment<'_>) -> Result<CommandOutput> {
        if env.is_admin() {
            return Ok(CommandOutput::new().line("ALREADY AUTHENTICATED AS ADMIN.", Style::Notice));
        }
        // Privilege flips only once the full delay has elapsed.
        Ok(CommandOutput::new()
            .animated("AUTHENTICATING...", Style::Notice)
            .pause(env.config.auth_delay())
            .then(Effect::SetPrivilege(Privilege::Admin))
            .line("", Style::Plain)
            .line("ACCESS GRANTED. WELCOME, ADMIN.", Style::Notice))
    }
}

// ---------------------------------------------------------------------------
// exit / logout
// ---------------------------------------------------------------------------

struct ExitCmd;
impl Command for ExitCmd {
    fn name(&self) -> &str {
        "exit"
    }
    fn aliases(&self) -> &[&str] {
        &["logout"]
    }
    fn description(&self) -> &str {
        "Logout/Exit admin mode"
    }
    fn usage(&self) -> &str {
        "exit"
    }
    fn execute(&self, _args: &str, env: &Environment<'_>) -> Result<CommandOutput> {
        if !env.is_admin() {
            return Ok(CommandOutput::new().line("ALREADY IN GUEST MODE.", Style::Notice));
        }
        Ok(CommandOutput::new()
            .then(Effect::SetPrivilege(Privilege::Guest))
            .line("LOGGING OUT... SESSION TERMINATED.", Style::Notice))
    }
}

// ---------------------------------------------------------------------------
// view
// ---------------------------------------------------------------------------

struct ViewCmd;
impl Command for ViewCmd {
    fn name(&self) -> &str {
        "view"
    }
    fn description(&self) -> &str {
        "View specific item info"
    }
    fn usage(&self) -> &str {
        "view [id]"
    }
    fn reads_content(&self) -> bool {
        true
    }
    fn locked_for(&self, privilege: Privilege, policy: ContentPolicy) -> bool {
        projects_gated(privilege, policy)
    }
    fn execute(&self, args: &str, env: &Environment<'_>) -> Result<CommandOutput> {
        let files = env.files()?;
        if env.projects_locked() {
            return Ok(CommandOutput::new().line(
                format!("ACCESS DENIED: OBJECT '{args}' REQUIRES AUTHORIZATION."),
                Style::Error,
            ));
        }
        let out = match files.get(args) {
            Some(block) => CommandOutput::new().block(block.clone()),
            None => CommandOutput::new()
                .line(format!("Error: Object '{args}' not found."), Style::Error),
        };
        Ok(out)
    }
}

// ---------------------------------------------------------------------------
// lang
// ---------------------------------------------------------------------------

struct LangCmd;
impl Command for LangCmd {
    fn name(&self) -> &str {
        "lang"
    }
    fn description(&self) -> &str {
        "Show or switch display language"
    }
    fn usage(&self) -> &str {
        "lang [code]"
    }
    fn execute(&self, args: &str, env: &Environment<'_>) -> Result<CommandOutput> {
        if args.is_empty() {
            let available = Language::ALL
                .iter()
                .map(|l| l.code().to_uppercase())
                .collect::<Vec<_>>()
                .join(", ");
            return Ok(CommandOutput::new()
                .line(
                    format!("LANGUAGE: {}", env.session.language().code().to_uppercase()),
                    Style::Plain,
                )
                .line(format!("AVAILABLE: {available}"), Style::Plain));
        }

        let default = env.config.default_language;
        let mut out = CommandOutput::new();
        let lang = match Language::from_code(args) {
            Some(lang) => lang,
            None => {
                out = out.line(
                    format!(
                        "UNKNOWN LANGUAGE '{args}'. FALLING BACK TO {}.",
                        default.code().to_uppercase()
                    ),
                    Style::Error,
                );
                default
            },
        };
        Ok(out.then(Effect::SetLanguage(lang)).line(
            format!("LANGUAGE SET: {}", lang.code().to_uppercase()),
            Style::Notice,
        ))
    }
}
