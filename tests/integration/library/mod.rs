mod scenarios;
mod session;
