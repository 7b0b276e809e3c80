mod filters;
mod report;
