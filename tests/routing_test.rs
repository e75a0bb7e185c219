//! Routing Integration Tests
//! Run with: cargo test --test routing_test

use std::sync::{Arc, Once};

use async_trait::async_trait;
use parking_lot::Mutex;

use lazybot::domain::entities::{Channel, Member};
use lazybot::{
    Bot, BotError, BotInfo, CallbackHandler, Command, CommandError, CommandRegistry, Dispatch, EventSink, Guild,
    Message, Params, PropertyHandler, RouterEvent, Router, Scope, SubcommandHandler, User,
};

static INIT: Once = Once::new();

fn ensure_init() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    });
}

#[derive(Default)]
struct ChatLog {
    sent: Mutex<Vec<(String, String)>>,
}

#[async_trait]
impl Bot for ChatLog {
    async fn start(&self) -> Result<(), BotError> {
        Ok(())
    }

    async fn send_message(&self, chat_id: &str, text: &str) -> Result<String, BotError> {
        self.sent.lock().push((chat_id.to_string(), text.to_string()));
        Ok(format!("m{}", self.sent.lock().len()))
    }

    fn bot_info(&self) -> BotInfo {
        BotInfo {
            id: "999".to_string(),
            name: "lazybot".to_string(),
            username: "lazybot".to_string(),
        }
    }
}

#[derive(Default)]
struct Events(Mutex<Vec<String>>);

impl EventSink for Events {
    fn record(&self, event: &RouterEvent) {
        self.0.lock().push(event.to_string());
    }
}

struct Guildhall;

impl Guild for Guildhall {
    fn id(&self) -> &str {
        "guildhall"
    }

    fn member(&self, id: &str) -> Option<Member> {
        (id == "5").then(|| Member::new(User::new("5").with_username("eve")).with_nickname("Eve"))
    }

    fn channel(&self, id: &str) -> Option<Channel> {
        (id == "6").then(|| Channel::new("6", "lobby"))
    }
}

type Invocations = Arc<Mutex<Vec<(String, Vec<String>)>>>;

struct Harness {
    router: Router,
    chat: Arc<ChatLog>,
    events: Arc<Events>,
    calls: Invocations,
}

impl Harness {
    fn new() -> Self {
        ensure_init();
        let events = Arc::new(Events::default());
        let registry = Arc::new(CommandRegistry::new(events.clone()));
        let chat = Arc::new(ChatLog::default());
        let calls = Invocations::default();

        registry.register(
            Command::handler("greet", recorder("greet", &calls)).with_synonyms(["hello"]),
        );
        registry.hook("y", Command::handler("y", recorder("y", &calls)));

        Self {
            router: Router::new(registry, chat.clone()),
            chat,
            events,
            calls,
        }
    }

    fn registry(&self) -> &Arc<CommandRegistry> {
        self.router.registry()
    }

    fn replies(&self) -> Vec<String> {
        self.chat.sent.lock().iter().map(|(_, text)| text.clone()).collect()
    }
}

fn recorder(label: &'static str, calls: &Invocations) -> CallbackHandler {
    let calls = calls.clone();
    CallbackHandler::new(move |params: Params| {
        calls.lock().push((
            label.to_string(),
            params.args.iter().map(|a| a.value().to_string()).collect(),
        ));
        async move { params.reply(format!("{} {}", label, params.rest())).await }
    })
}

fn in_guild(text: &str) -> Message {
    Message::new("lobby", User::new("1").with_username("ada"), text)
        .with_scope(Scope::group(Arc::new(Guildhall)))
        .with_member_name("Ada")
}

fn direct(text: &str) -> Message {
    Message::new("dm", User::new("1").with_username("ada"), text)
}

#[tokio::test]
async fn test_greet_scenario() {
    let h = Harness::new();

    let outcome = h.router.parse(in_guild("!greet world")).await;

    assert_eq!(outcome, Dispatch::Handled { command: "greet".to_string() });
    assert_eq!(*h.calls.lock(), vec![("greet".to_string(), vec!["world".to_string()])]);
    assert_eq!(*h.chat.sent.lock(), vec![("lobby".to_string(), "greet world".to_string())]);
}

#[tokio::test]
async fn test_hi_alias_matches_greet_scenario() {
    let h = Harness::new();
    h.registry().hook("hi", "greet $1");

    h.router.parse(in_guild("!hi world")).await;
    h.router.parse(in_guild("!greet world")).await;

    let calls = h.calls.lock();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0], calls[1]);
}

#[tokio::test]
async fn test_star_alias_matches_direct_invocation() {
    let h = Harness::new();
    h.registry().hook("x", "y $*");

    h.router.parse(direct("x 1 2")).await;
    h.router.parse(direct("y 1 2")).await;

    assert_eq!(
        *h.calls.lock(),
        vec![
            ("y".to_string(), vec!["1".to_string(), "2".to_string()]),
            ("y".to_string(), vec!["1".to_string(), "2".to_string()]),
        ]
    );
}

#[tokio::test]
async fn test_alias_preserves_quoted_arguments() {
    let h = Harness::new();
    h.registry().hook("x", "y $*");

    h.router.parse(direct("x \"one two\" three")).await;

    assert_eq!(
        *h.calls.lock(),
        vec![("y".to_string(), vec!["one two".to_string(), "three".to_string()])]
    );
}

#[tokio::test]
async fn test_unhook_makes_command_unresolvable() {
    let h = Harness::new();
    h.registry().hook("x", CallbackHandler::new(|_| async { Ok(()) }));
    assert!(h.registry().unhook("x"));

    assert!(h.registry().resolve("x").is_none());
    assert_eq!(h.router.parse(direct("x")).await, Dispatch::Ignored);
}

#[tokio::test]
async fn test_synonyms_route_identically() {
    let h = Harness::new();

    h.router.parse(direct("greet a b")).await;
    h.router.parse(direct("HELLO a b")).await;

    let calls = h.calls.lock();
    assert_eq!(calls[0], calls[1]);
    assert!(Arc::ptr_eq(
        &h.registry().resolve("greet").unwrap(),
        &h.registry().resolve("hello").unwrap()
    ));
}

#[tokio::test]
async fn test_hook_and_handler_errors_reach_the_sink() {
    let h = Harness::new();
    h.registry().hook(
        "explode",
        Command::handler(
            "explode",
            CallbackHandler::new(|_| async { Err(CommandError::ExecutionFailed("kaboom".to_string())) }),
        ),
    );

    let outcome = h.router.parse(direct("explode")).await;

    assert!(matches!(outcome, Dispatch::Failed { .. }));
    let events = h.events.0.lock();
    assert!(events.contains(&"Hook command 'greet'.".to_string()));
    assert!(events.contains(&"Hook command 'hello'.".to_string()));
    assert!(events.contains(&"Command 'explode' failed: Execution failed: kaboom".to_string()));
    assert!(h.replies().is_empty());
}

#[tokio::test]
async fn test_subcommand_pre_check_gates_everything() {
    let h = Harness::new();
    let inner = recorder("inner", &h.calls);
    h.registry().hook(
        "admin",
        Command::handler(
            "admin",
            SubcommandHandler::new()
                .subcommand("run", inner)
                .pre_check(|params: Params| async move { Ok(Some(params.message.sender.id == "root")) }),
        ),
    );

    let outcome = h.router.parse(direct("admin run now")).await;

    assert_eq!(outcome, Dispatch::Handled { command: "admin".to_string() });
    assert!(h.calls.lock().is_empty());
    assert!(h.replies().is_empty());

    let root = Message::new("dm", User::new("root"), "admin run now");
    h.router.parse(root).await;
    assert_eq!(*h.calls.lock(), vec![("inner".to_string(), vec!["now".to_string()])]);
}

#[tokio::test]
async fn test_property_routes_getter_and_setter() {
    let h = Harness::new();
    h.registry().hook("topic", Command::handler("topic", PropertyHandler::data("topic")));

    h.router.parse(in_guild("!topic")).await;
    h.router.parse(in_guild("!topic \"rust and bots\"")).await;
    h.router.parse(in_guild("!topic")).await;

    assert_eq!(
        h.replies(),
        vec!["topic = (unset)", "topic set to rust and bots", "topic = rust and bots"]
    );
}

#[tokio::test]
async fn test_mentions_resolve_in_guild_only() {
    let h = Harness::new();
    let seen: Arc<Mutex<Vec<(Option<String>, Option<String>)>>> = Arc::default();
    let record = seen.clone();
    h.registry().hook(
        "who",
        CallbackHandler::new(move |params: Params| {
            record.lock().extend(params.args.iter().map(|a| {
                (a.member().map(|m| m.display_name()), a.channel().map(|c| c.name.clone()))
            }));
            async { Ok(()) }
        }),
    );

    h.router.parse(in_guild("!who <@!5> <#6>")).await;
    h.router.parse(direct("who <@!5>")).await;

    assert_eq!(
        *seen.lock(),
        vec![
            (Some("Eve".to_string()), None),
            (None, Some("lobby".to_string())),
            (None, None),
        ]
    );
}

#[tokio::test]
async fn test_display_name_prefers_member_name() {
    let h = Harness::new();
    let names: Arc<Mutex<Vec<String>>> = Arc::default();
    let record = names.clone();
    h.registry().hook(
        "me",
        CallbackHandler::new(move |params: Params| {
            record.lock().push(params.display_name.clone());
            async { Ok(()) }
        }),
    );

    h.router.parse(in_guild("!me")).await;
    h.router.parse(direct("me")).await;

    assert_eq!(*names.lock(), vec!["Ada", "ada"]);
}

#[tokio::test]
async fn test_concurrent_messages_share_registry() {
    let h = Arc::new(Harness::new());

    let tasks: Vec<_> = (0..8)
        .map(|i| {
            let h = h.clone();
            tokio::spawn(async move { h.router.parse(direct(&format!("greet n{}", i))).await })
        })
        .collect();

    for task in tasks {
        assert_eq!(task.await.unwrap(), Dispatch::Handled { command: "greet".to_string() });
    }
    assert_eq!(h.calls.lock().len(), 8);
}
