mod indexing;
mod persistence;
mod search;
