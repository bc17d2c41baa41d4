//! Catalog demos
//!
//! Each demo composes toolkit pieces into a small runnable scenario and
//! returns the lines it would print. The binary prints them; tests snapshot
//! them.

use std::fmt;
use std::sync::Arc;

use clap::ValueEnum;
use tracing::info;

use super::factory::{create_audit_sink, create_clone_registry, create_tree};
use crate::config::KitConfig;
use crate::domain::builder::{BuildPlan, Builder, Director, StepError, StepResult};
use crate::domain::capability::{capability, Capability, CapabilityExt};
use crate::domain::factory::FactoryRegistry;
use crate::domain::guard::{AuditPolicy, LazyTarget};
use crate::domain::outcome::Outcome;
use crate::domain::ports::{CredentialSource, Credentials};
use crate::domain::prototype::OverrideSet;
use crate::domain::singleton::SingletonRegistry;
use crate::domain::wrapper::Authenticate;
use crate::error::KitResult;
use crate::infrastructure::{EnvCredentials, MemoryAuditSink, StaticCredentials};

/// Runnable demos.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Demo {
    Prototype,
    Composite,
    Decorator,
    Proxy,
    Singleton,
    Builder,
    Factory,
    Adapter,
    Bridge,
    Facade,
}

impl Demo {
    pub fn name(&self) -> &'static str {
        match self {
            Demo::Prototype => "prototype",
            Demo::Composite => "composite",
            Demo::Decorator => "decorator",
            Demo::Proxy => "proxy",
            Demo::Singleton => "singleton",
            Demo::Builder => "builder",
            Demo::Factory => "factory",
            Demo::Adapter => "adapter",
            Demo::Bridge => "bridge",
            Demo::Facade => "facade",
        }
    }
}

/// Inputs shared by all demos.
#[derive(Debug, Clone, Default)]
pub struct DemoContext {
    pub config: KitConfig,
    /// Credentials presented to the decorator demo. Falls back to
    /// `KITBASH_USERNAME`/`KITBASH_PASSWORD` when absent.
    pub credentials: Option<Credentials>,
}

impl DemoContext {
    pub fn new(config: KitConfig) -> Self {
        Self {
            config,
            credentials: None,
        }
    }

    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }
}

pub fn run_demo(demo: Demo, ctx: &DemoContext) -> KitResult<Vec<String>> {
    info!(demo = demo.name(), "running demo");
    match demo {
        Demo::Prototype => prototype(ctx),
        Demo::Composite => composite(ctx),
        Demo::Decorator => decorator(ctx),
        Demo::Proxy => proxy(ctx),
        Demo::Singleton => singleton(),
        Demo::Builder => builder(),
        Demo::Factory => factory(),
        Demo::Adapter => adapter(),
        Demo::Bridge => bridge(),
        Demo::Facade => facade(),
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
struct Person {
    name: String,
    age: u32,
}

fn prototype(ctx: &DemoContext) -> KitResult<Vec<String>> {
    let registry = create_clone_registry(&ctx.config);
    registry.register(
        "p",
        Person {
            name: "a".to_string(),
            age: 15,
        },
    )?;

    let older = registry.clone("p", &OverrideSet::new().set("age", 20))?;
    let original = registry.get("p")?;

    Ok(vec![format!("{:?}", older), format!("{:?}", original)])
}

fn composite(ctx: &DemoContext) -> KitResult<Vec<String>> {
    let tree = create_tree(&ctx.config);
    let leaf_one = tree.new_leaf("Leaf 1");
    let leaf_two = tree.new_leaf("Leaf 2");
    let first = tree.new_composite("Composite 1");
    let second = tree.new_composite("Composite 2");

    tree.add_child(first, leaf_one)?;
    tree.add_child(second, leaf_one)?;
    tree.add_child(second, leaf_two)?;

    Ok(vec![tree.operate(first)?, tree.operate(second)?])
}

fn decorator(ctx: &DemoContext) -> KitResult<Vec<String>> {
    let presented = ctx
        .credentials
        .clone()
        .or_else(|| EnvCredentials::default().credentials());

    let page = capability(|| "<html>welcome to the admin page</html>".to_string())
        .wrap(Authenticate::new(presented, StaticCredentials::new("admin", "123")));

    Ok(vec![describe(page.invoke()?)])
}

/// Delivered text, or the denial reason.
fn describe(outcome: Outcome<String>) -> String {
    match outcome {
        Outcome::Delivered(text) => text,
        Outcome::Denied(denial) => denial.to_string(),
    }
}

fn server() -> impl Fn() -> Vec<String> + Send + Sync {
    || {
        vec![
            "request received .. starting process..".to_string(),
            "done".to_string(),
        ]
    }
}

fn proxy(ctx: &DemoContext) -> KitResult<Vec<String>> {
    let memory = Arc::new(MemoryAuditSink::new());
    let sink = create_audit_sink(&ctx.config, Arc::clone(&memory));

    let proxied =
        LazyTarget::new(|| Ok(capability(server()))).guard("server", AuditPolicy::new(sink));

    let mut lines = match proxied.invoke()? {
        Outcome::Delivered(lines) => lines,
        Outcome::Denied(denial) => vec![denial.to_string()],
    };
    match &ctx.config.audit.path {
        Some(path) => lines.push(format!("audit written to {}", path.display())),
        None => lines.extend(memory.lines()),
    }
    Ok(lines)
}

#[derive(Debug)]
struct Settings {
    env: &'static str,
}

fn singleton() -> KitResult<Vec<String>> {
    let registry = SingletonRegistry::new();
    let first = registry.instance(|| Settings { env: "production" })?;
    let second = registry.instance(|| Settings { env: "staging" })?;

    Ok(vec![
        format!("same instance: {}", Arc::ptr_eq(&first, &second)),
        format!("env: {}", second.env),
    ])
}

#[derive(Debug, Default)]
struct House {
    foundation: Option<&'static str>,
    walls: Option<&'static str>,
    roof: Option<&'static str>,
}

impl fmt::Display for House {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let part = |p: Option<&'static str>| p.unwrap_or("none");
        write!(
            f,
            "house with foundation={}, walls={}, roof={}",
            part(self.foundation),
            part(self.walls),
            part(self.roof)
        )
    }
}

/// House builder parameterized by its materials.
struct HouseBuilder {
    foundation: &'static str,
    walls: &'static str,
    roof: &'static str,
    house: Option<House>,
}

impl HouseBuilder {
    fn one() -> Self {
        Self::with_parts("one", "10", "stone")
    }

    fn two() -> Self {
        Self::with_parts("two", "20", "wooden")
    }

    fn with_parts(foundation: &'static str, walls: &'static str, roof: &'static str) -> Self {
        Self {
            foundation,
            walls,
            roof,
            house: None,
        }
    }
}

impl Builder for HouseBuilder {
    type Product = House;

    fn initialize(&mut self) {
        self.house = Some(House::default());
    }

    fn apply(&mut self, step: &str) -> StepResult {
        let house = self
            .house
            .as_mut()
            .ok_or_else(|| StepError::failed("house not started"))?;
        match step {
            "foundation" => house.foundation = Some(self.foundation),
            "walls" => house.walls = Some(self.walls),
            "roof" => house.roof = Some(self.roof),
            _ => return Err(StepError::Unsupported),
        }
        Ok(())
    }

    fn finalize(&mut self) -> Result<House, StepError> {
        self.house
            .take()
            .ok_or_else(|| StepError::failed("house not started"))
    }

    fn discard(&mut self) {
        self.house = None;
    }
}

fn builder() -> KitResult<Vec<String>> {
    let director = Director::new(BuildPlan::new(["foundation", "walls", "roof"]));
    let mut builders: Vec<Box<dyn Builder<Product = House>>> =
        vec![Box::new(HouseBuilder::one()), Box::new(HouseBuilder::two())];

    builders
        .iter_mut()
        .map(|b| director.build(b.as_mut()).map(|house| house.to_string()))
        .collect()
}

trait Widget {
    fn show(&self) -> String;
}

struct Labeled(&'static str);

impl Widget for Labeled {
    fn show(&self) -> String {
        format!("show {}!", self.0)
    }
}

/// One widget family.
trait GuiFactory: Send + Sync {
    fn create_button(&self) -> Box<dyn Widget>;
    fn create_checkbox(&self) -> Box<dyn Widget>;
}

struct WindowsFactory;

impl GuiFactory for WindowsFactory {
    fn create_button(&self) -> Box<dyn Widget> {
        Box::new(Labeled("windows button"))
    }

    fn create_checkbox(&self) -> Box<dyn Widget> {
        Box::new(Labeled("windows checkbox"))
    }
}

struct MacOsFactory;

impl GuiFactory for MacOsFactory {
    fn create_button(&self) -> Box<dyn Widget> {
        Box::new(Labeled("MacOs button"))
    }

    fn create_checkbox(&self) -> Box<dyn Widget> {
        Box::new(Labeled("MacOs checkbox"))
    }
}

fn factory() -> KitResult<Vec<String>> {
    let families: FactoryRegistry<Box<dyn GuiFactory>> = FactoryRegistry::new();
    families.register("windows", || Box::new(WindowsFactory) as Box<dyn GuiFactory>);
    families.register("macos", || Box::new(MacOsFactory) as Box<dyn GuiFactory>);

    let documents: FactoryRegistry<String> = FactoryRegistry::new();
    documents.register("pdf", || "open pdf document".to_string());
    documents.register("html", || "open html document".to_string());

    let mut lines = Vec::new();
    for key in ["windows", "macos"] {
        let family = families.create(key)?;
        lines.push(family.create_button().show());
        lines.push(family.create_checkbox().show());
    }
    for key in documents.keys() {
        lines.push(documents.create(&key)?);
    }
    Ok(lines)
}

#[derive(Debug, Clone)]
struct Mp4(String);

#[derive(Debug, Clone)]
struct Mp3(String);

fn adapter() -> KitResult<Vec<String>> {
    let player = capability(|| Mp4("myfile".to_string())).adapt(|Mp4(file)| Mp3(file));

    let lines = match player.invoke()? {
        Outcome::Delivered(Mp3(file)) => vec![
            format!("converting mp4 file to mp3 file : {}", file),
            format!("playing mp3 file : {}", file),
        ],
        Outcome::Denied(denial) => vec![denial.to_string()],
    };
    Ok(lines)
}

type Implementation = Arc<dyn Capability<Output = String>>;

/// Abstraction whose work is done by an interchangeable implementation.
struct Remote {
    name: &'static str,
    implementation: Implementation,
}

impl Remote {
    fn new(name: &'static str, implementation: Implementation) -> Self {
        Self {
            name,
            implementation,
        }
    }

    fn perform_action(&self) -> KitResult<String> {
        let done = describe(self.implementation.invoke()?);
        Ok(format!("{} -> {}", self.name, done))
    }
}

fn bridge() -> KitResult<Vec<String>> {
    let implementations: [Implementation; 2] = [
        Arc::new(capability(|| "implementation one".to_string())),
        Arc::new(capability(|| "implementation two".to_string())),
    ];

    implementations
        .into_iter()
        .map(|implementation| Remote::new("abstraction", implementation).perform_action())
        .collect()
}

type Subsystem = Box<dyn Capability<Output = String>>;

/// One call that boots every subsystem in order.
struct Computer {
    subsystems: Vec<Subsystem>,
}

impl Computer {
    fn new() -> Self {
        let memory = capability(|| "loading from memory...".to_string());
        let ssd = capability(|| "reading from ssd...".to_string());
        let cpu = capability(|| "executing...".to_string());
        Self {
            subsystems: vec![
                Box::new(memory) as Subsystem,
                Box::new(ssd) as Subsystem,
                Box::new(cpu) as Subsystem,
            ],
        }
    }

    fn start(&self) -> KitResult<Vec<String>> {
        self.subsystems
            .iter()
            .map(|subsystem| Ok(describe(subsystem.invoke()?)))
            .collect()
    }
}

fn facade() -> KitResult<Vec<String>> {
    Computer::new().start()
}
