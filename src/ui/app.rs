//! Main search application window.
//!
//! Implements eframe::App: a gene field, a Search button, and the body
//! derived from the session snapshot. Requests run on the tokio runtime and
//! report back over channels drained once per frame.

use std::sync::mpsc::{self, Receiver, Sender};

use eframe::egui;
use tokio::runtime::Handle;

use crate::api::protocol::{RequestStatus, VariantsResponse};
use crate::api::ApiClient;
use crate::config::BrowserConfig;
use crate::search::{render_plan, SearchSession, SearchTicket};
use crate::ui::results::{BodyAction, ResultsView};
use crate::ui::status::{ApiHealth, StatusLookup};
use crate::Result;

/// Outcome of one dispatched search, tagged with its ticket number.
type SearchOutcome = (u64, Result<VariantsResponse>);

/// The main search application.
pub struct SearchApp {
    /// Text edit buffer for the gene field.
    query: String,
    /// Search state and request sequencing.
    session: SearchSession,
    /// Variant API client (cloned into each request task).
    client: ApiClient,
    /// Tokio runtime handle for async operations.
    runtime: Handle,
    /// Completed searches, sent from request tasks.
    outcome_tx: Sender<SearchOutcome>,
    outcome_rx: Receiver<SearchOutcome>,
    /// API reachability shown in the status bar.
    api_health: ApiHealth,
    pending_health: Option<Receiver<ApiHealth>>,
    /// Status lookup for the displayed request id.
    status_lookup: Option<(String, StatusLookup)>,
    pending_status: Option<Receiver<(String, Result<RequestStatus>)>>,
}

impl SearchApp {
    /// Create a new search application and start the API health check.
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        runtime: Handle,
        client: ApiClient,
        config: &BrowserConfig,
    ) -> Self {
        let (outcome_tx, outcome_rx) = mpsc::channel();

        let mut app = Self {
            query: String::new(),
            session: SearchSession::new(config.stale_responses),
            client,
            runtime,
            outcome_tx,
            outcome_rx,
            api_health: ApiHealth::Checking,
            pending_health: None,
            status_lookup: None,
            pending_status: None,
        };
        app.check_health(&cc.egui_ctx);
        app
    }

    /// Kick off the one-time `/health` probe.
    fn check_health(&mut self, ctx: &egui::Context) {
        let (tx, rx) = mpsc::channel();
        self.pending_health = Some(rx);

        let client = self.client.clone();
        let ctx = ctx.clone();
        self.runtime.spawn(async move {
            let result = client.health().await;
            if let Err(e) = &result {
                tracing::warn!("Variant API health check failed: {}", e);
            }
            let _ = tx.send(ApiHealth::from_result(&result));
            ctx.request_repaint();
        });
    }

    /// Handle a Search click.
    fn start_search(&mut self, ctx: &egui::Context) {
        if let Some(ticket) = self.session.run_search() {
            self.dispatch(ticket, ctx);
        }
    }

    /// Run a search ticket on the runtime.
    fn dispatch(&self, ticket: SearchTicket, ctx: &egui::Context) {
        let client = self.client.clone();
        let tx = self.outcome_tx.clone();
        let ctx = ctx.clone();

        self.runtime.spawn(async move {
            let result = client.fetch_variants(&ticket.gene).await;
            let _ = tx.send((ticket.seq, result));
            ctx.request_repaint();
        });
    }

    /// Start a `/status` lookup for a request id.
    fn start_status_lookup(&mut self, request_id: String, ctx: &egui::Context) {
        let (tx, rx) = mpsc::channel();
        self.pending_status = Some(rx);
        self.status_lookup = Some((request_id.clone(), StatusLookup::Pending));

        let client = self.client.clone();
        let ctx = ctx.clone();
        self.runtime.spawn(async move {
            let result = client.request_status(&request_id).await;
            if let Err(e) = &result {
                tracing::warn!("Status lookup for {} failed: {}", request_id, e);
            }
            let _ = tx.send((request_id, result));
            ctx.request_repaint();
        });
    }

    /// Check for and process finished background work.
    fn check_pending_results(&mut self) {
        while let Ok((seq, outcome)) = self.outcome_rx.try_recv() {
            self.session.resolve(seq, outcome);
        }

        if let Some(rx) = &self.pending_health {
            if let Ok(health) = rx.try_recv() {
                self.api_health = health;
                self.pending_health = None;
            }
        }

        if let Some(rx) = &self.pending_status {
            if let Ok((request_id, result)) = rx.try_recv() {
                self.status_lookup = Some((request_id, StatusLookup::from_result(result)));
                self.pending_status = None;
            }
        }
    }

    /// Status line for the request id currently on screen, if looked up.
    fn status_line(&self, request_id: Option<&str>) -> Option<String> {
        match (&self.status_lookup, request_id) {
            (Some((looked_up, lookup)), Some(current)) if looked_up == current => {
                Some(lookup.line())
            }
            _ => None,
        }
    }
}

impl eframe::App for SearchApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Check for finished requests
        self.check_pending_results();

        // Status bar
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(self.api_health.label());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.weak(self.client.base_url());
                });
            });
        });

        // Main UI panel
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Mutation Browser");
            ui.add_space(8.0);

            // Search bar: only the button triggers a search
            let mut search_clicked = false;
            ui.horizontal(|ui| {
                let response = ui.add(
                    egui::TextEdit::singleline(&mut self.query)
                        .desired_width(240.0)
                        .hint_text("Enter gene (e.g. TP53)"),
                );
                if response.changed() {
                    self.session.set_query(&self.query);
                }
                search_clicked = ui.button("Search").clicked();
            });
            if search_clicked {
                self.start_search(ctx);
            }

            ui.add_space(8.0);

            // Body
            let state = self.session.state();
            let plan = render_plan(&state);
            let status_line = self.status_line(state.request_id.as_deref());
            if let Some(BodyAction::CheckStatus(request_id)) =
                ResultsView::show(ui, &plan, status_line.as_deref())
            {
                self.start_status_lookup(request_id, ctx);
            }
        });
    }
}
