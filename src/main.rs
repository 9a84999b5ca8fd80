use std::process::ExitCode;
use std::rc::Rc;

use host_dom::snapshot::{DomSnapshot, DomSnapshotOptions};
use host_dom::{HostDocument, HostDocumentConfig};
use mimalloc::MiMalloc;
use view::{
    ANode, ComponentDefinition, ComponentLoader, DirectiveValue, Model, ViewError, ViewNode,
    hydrate,
};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// Server output for the `app` component below, as it would arrive over the
/// wire: a header, a template region, and the chart's loading placeholder.
fn server_document() -> Result<HostDocument, ViewError> {
    let mut doc = HostDocument::new(HostDocumentConfig {
        record_mutations: true,
        ..HostDocumentConfig::default()
    });
    let root = doc.root();
    let main = doc.create_element("main");
    doc.append_child(root, main)?;

    let header = doc.create_element("header");
    doc.append_child(main, header)?;
    let title = doc.create_text("Dashboard");
    doc.append_child(header, title)?;
    let gap = doc.create_text("\n  ");
    doc.append_child(main, gap)?;

    let start = doc.create_comment("list");
    let item = doc.create_element("li");
    let end = doc.create_comment("list");
    for node in [start, item, end] {
        doc.append_child(main, node)?;
    }

    let spinner = doc.create_element("progress");
    doc.append_child(main, spinner)?;
    doc.take_mutations();
    Ok(doc)
}

fn print_tree(doc: &HostDocument, label: &str) -> Result<(), ViewError> {
    let tree = doc.materialize(doc.root())?;
    println!("-- {label}");
    println!("{}", DomSnapshot::of_children(&tree, DomSnapshotOptions::default()));
    Ok(())
}

fn run() -> Result<(), ViewError> {
    let chart = Rc::new(
        ComponentLoader::new()
            .with_placeholder(Rc::new(ComponentDefinition::new("spinner", ANode::new("progress"))))
            .with_fallback(Rc::new(ComponentDefinition::new(
                "chart-error",
                ANode::new("p").with_prop("class", "error"),
            ))),
    );
    let app = ComponentDefinition::new(
        "app",
        ANode::new("main").with_children([
            ANode::new("div").with_is(DirectiveValue::Binding("banner".into())),
            ANode::new("template").with_child(ANode::new("li")),
            ANode::new("chart"),
        ]),
    )
    .with_loader("chart", Rc::clone(&chart))
    .with_data("banner", "header");

    let mut doc = server_document()?;
    print_tree(&doc, "server markup")?;

    let target = doc.root();
    let mut root = hydrate(&mut doc, target, &app)?;
    log::info!(
        "hydrated with {} host mutations",
        doc.take_mutations().len()
    );
    print_tree(&doc, "hydrated")?;

    chart.resolve(Rc::new(ComponentDefinition::new(
        "chart",
        ANode::new("canvas").with_prop("width", "640"),
    )));
    let change = Model::new().set("tick", "1");
    root.update(&mut doc, &[change])?;
    print_tree(&doc, "after chart resolved")?;

    root.dispose(&mut doc, false, false)?;
    log::info!("disposed; {} mutations", doc.mutations().len());
    print_tree(&doc, "disposed")?;
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
