//! The board: one flow diagram instance as the host sees it.

use rivulet_core::{Payload, Point, Size};
use rivulet_graph::{Edge, FlowError, FlowEvent, FlowSnapshot, GraphStore, Handles, Node};

use crate::config::BoardConfig;
use crate::interaction::Interaction;

/// Default flow shown when the host provides no initial payload: an
/// input -> process -> output chain with animated arrow-tipped edges,
/// plus one freestanding draft card parked away from the chain.
#[must_use]
pub fn starter_flow() -> FlowSnapshot {
    fn step(
        id: &str,
        at: Point,
        label: &str,
        content: &str,
        number: &str,
        color: &str,
    ) -> Node {
        let mut data = Payload::new();
        data.insert("label", serde_json::json!(label));
        data.insert("content", serde_json::json!(content));
        data.insert("number", serde_json::json!(number));
        data.insert("backgroundColor", serde_json::json!(color));
        data.insert("toolName", serde_json::json!("Sin herramienta"));
        let mut node = Node::new(id.parse().expect("starter ids are non-blank"), at)
            .with_size(Size::new(280.0, 100.0))
            .with_dimensions(Size::new(280.0, 96.0))
            .with_data(data)
            .with_handles(Handles {
                source: vec!["bottom".parse().expect("starter handles are non-blank")],
                target: vec!["top".parse().expect("starter handles are non-blank")],
            });
        node.view.initialized = true;
        node
    }

    fn chain(id: &str, source: &str, target: &str) -> Edge {
        let mut edge = Edge::new(
            id.parse().expect("starter ids are non-blank"),
            source.parse().expect("starter ids are non-blank"),
            "bottom".parse().expect("starter handles are non-blank"),
            target.parse().expect("starter ids are non-blank"),
            "top".parse().expect("starter handles are non-blank"),
        );
        edge.extra.insert("animated", serde_json::json!(true));
        edge.extra.insert(
            "markerEnd",
            serde_json::json!({"type": "arrow", "color": "#37352F", "width": 20, "height": 20}),
        );
        edge
    }

    // The draft card declares no handles, so no geometry is derived for
    // it and edges cannot attach to it.
    let mut draft_data = Payload::new();
    draft_data.insert("label", serde_json::json!("Nuevo Proceso"));
    draft_data.insert("content", serde_json::json!(""));
    draft_data.insert("number", serde_json::json!("N"));
    draft_data.insert("backgroundColor", serde_json::json!("#ffffff"));
    let mut draft = Node::new(
        "node_1749019815180".parse().expect("starter ids are non-blank"),
        Point::new(-184.293_213_818_503_9, -1_148.988_690_750_310_5),
    )
    .with_dimensions(Size::new(280.0, 75.0))
    .with_data(draft_data);
    draft.view.initialized = true;

    FlowSnapshot::new(
        vec![
            step(
                "input",
                Point::new(-125.175_203_534_345_88, -66.917_205_037_681_97),
                "Entrada",
                "Información de entrada",
                "1",
                "#E3F2FD",
            ),
            step(
                "process",
                Point::new(-34.034_269_957_177_3, 150.0),
                "Proceso",
                "Procesamiento de informacións",
                "2",
                "#F3E5F5",
            ),
            step(
                "output",
                Point::new(115.748_888_617_469_39, 306.866_934_273_479_3),
                "Salida",
                "Información de salida",
                "3",
                "#E8F5E9",
            ),
            draft,
        ],
        vec![chain("e1-2", "input", "process"), chain("e2-3", "process", "output")],
    )
}

/// One flow-diagram component instance: its style configuration plus the
/// graph it edits.
///
/// The board translates [`Interaction`] signals into graph operations and
/// forwards the store's events to the host unchanged.
#[derive(Debug, Clone)]
pub struct Board {
    /// Host style parameters.
    pub config: BoardConfig,
    store: GraphStore,
}

impl Board {
    /// Create a board showing the [`starter_flow`].
    #[must_use]
    pub fn new(config: BoardConfig) -> Self {
        Self::with_flow(config, starter_flow())
    }

    /// Create a board from a host-provided initial payload.
    #[must_use]
    pub fn with_flow(config: BoardConfig, flow: FlowSnapshot) -> Self {
        Self {
            config,
            store: GraphStore::from_snapshot(flow),
        }
    }

    /// Replace the graph with a newly bound payload, dropping any events
    /// queued by the previous graph.
    pub fn rebind(&mut self, flow: FlowSnapshot) {
        self.store.load(flow);
    }

    /// Apply one interaction signal as a graph operation.
    ///
    /// `DeletePressed` with nothing selected is a no-op. Rejected
    /// operations surface the store's error and leave the graph unchanged.
    ///
    /// # Errors
    ///
    /// Returns the [`FlowError`] of the underlying operation.
    pub fn apply(&mut self, interaction: Interaction) -> Result<(), FlowError> {
        match interaction {
            Interaction::NodeDragEnd { id, position } => self.store.move_node(&id, position),
            Interaction::NodeClick { id } => self.store.select_node(&id),
            Interaction::CanvasClick => {
                self.store.clear_selection();
                Ok(())
            }
            Interaction::ConnectEnd {
                source,
                source_handle,
                target,
                target_handle,
            } => self
                .store
                .connect(&source, &source_handle, &target, &target_handle)
                .map(|_| ()),
            Interaction::NodeResizeEnd { id, size } => self.store.resize_node(&id, size),
            Interaction::DeletePressed => {
                let Some(id) = self.store.selected_node().map(|node| node.id.clone()) else {
                    return Ok(());
                };
                self.store.delete_node(&id)
            }
        }
    }

    /// Drain events queued since the last call.
    pub fn take_events(&mut self) -> Vec<FlowEvent> {
        self.store.take_events()
    }

    /// Snapshot of the current graph.
    #[must_use]
    pub fn snapshot(&self) -> FlowSnapshot {
        self.store.snapshot()
    }

    /// Serialize the current graph to a JSON string.
    #[must_use]
    pub fn to_json(&self) -> String {
        self.store.to_json()
    }

    /// The underlying graph store.
    #[must_use]
    pub fn store(&self) -> &GraphStore {
        &self.store
    }

    /// Mutable access to the underlying graph store, for hosts driving
    /// operations directly instead of through interaction signals.
    pub fn store_mut(&mut self) -> &mut GraphStore {
        &mut self.store
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(BoardConfig::default())
    }
}
