mod parameters;
mod requests;
mod support;
