use anyhow::Context;
use brainstorm_graph::{
    GraphStore, GraphUpdateEvent, IdeaNode, NodeUpdate, RelationType, VisConfig,
};
use std::sync::Arc;
use tokio::sync::{mpsc::UnboundedReceiver, RwLock};
use tracing::info;
use tracing_subscriber::EnvFilter;

const VIS_CONFIG_ENV: &str = "BRAINSTORM_VIS_CONFIG";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("Brainstorm Graph v{}", brainstorm_graph::version());
    println!("==========================================");
    println!();

    let vis_config = load_vis_config()?;

    let (store, events) = GraphStore::with_event_channel();
    let store = Arc::new(RwLock::new(store));
    let watcher = tokio::spawn(watch_events(events));

    build_session(&store).await?;
    query_session(&store).await;

    let snapshot = store.read().await.vis_network_data_with(&vis_config);
    println!("\n=== Visualization projection ===");
    println!("{}", serde_json::to_string_pretty(&snapshot)?);

    // Dropping the store closes the event channel and ends the watcher
    drop(store);
    let seen = watcher.await.context("event watcher task failed")?;
    println!("\n{} change event(s) observed", seen);

    Ok(())
}

fn load_vis_config() -> anyhow::Result<VisConfig> {
    match std::env::var(VIS_CONFIG_ENV) {
        Ok(raw) => serde_json::from_str(&raw)
            .with_context(|| format!("invalid {} value", VIS_CONFIG_ENV)),
        Err(_) => Ok(VisConfig::default()),
    }
}

async fn watch_events(mut events: UnboundedReceiver<GraphUpdateEvent>) -> usize {
    let mut seen = 0;
    while let Some(event) = events.recv().await {
        seen += 1;
        info!("{}", serde_json::to_string(&event).unwrap_or_else(|_| event.event_type().to_string()));
    }
    seen
}

async fn build_session(store: &RwLock<GraphStore>) -> anyhow::Result<()> {
    println!("=== Building idea graph ===");
    let mut store = store.write().await;

    store.add_node(IdeaNode::new("city", "Greener city").with_priority(3.0).with_colour("#2e7d32"))?;
    store.add_node(IdeaNode::new("transit", "Free public transit").with_level(1).with_priority(2.0))?;
    store.add_node(IdeaNode::new("bikes", "Protected bike lanes").with_level(1))?;
    store.add_node(IdeaNode::new("parking", "Remove downtown parking").with_level(2))?;
    store.add_node(IdeaNode::new("budget", "Fixed transport budget"))?;

    store.add_relationship("city", "transit", RelationType::ParentChild, 1.0)?;
    store.add_relationship("city", "bikes", RelationType::ParentChild, 1.0)?;
    store.add_relationship("bikes", "parking", RelationType::ParentChild, 0.8)?;
    store.add_relationship("transit", "bikes", RelationType::Supports, 0.7)?;
    store.add_relationship("budget", "transit", RelationType::Contradicts, 0.9)?;

    store.update_node("parking", NodeUpdate::new().label("Convert parking to bike lanes"))?;
    store.update_relationship_strength("transit", "bikes", 0.9)?;

    println!("✓ {} ideas, {} relationships", store.node_count(), store.edge_count());
    Ok(())
}

async fn query_session(store: &RwLock<GraphStore>) {
    let store = store.read().await;

    let roots: Vec<_> = store.get_root_nodes().into_iter().map(|n| n.label.as_str()).collect();
    println!("\nRoot ideas: {:?}", roots);

    let subtree: Vec<_> = store.get_subtree("city").into_iter().map(|n| n.id().as_str()).collect();
    println!("Subtree of 'city': {:?}", subtree);

    let path: Vec<_> = store.find_path("city", "parking").into_iter().map(|n| n.id().as_str()).collect();
    println!("Path city -> parking: {:?}", path);

    let related: Vec<_> = store
        .get_related_ideas("budget", 2)
        .into_iter()
        .map(|n| n.id().as_str())
        .collect();
    println!("Within 2 hops of 'budget': {:?}", related);
}
