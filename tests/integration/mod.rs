mod client;
mod dashboard_flow;
