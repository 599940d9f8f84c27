//! Playthroughs of the scripts under `demos/`.

mod choices;
mod counting;
mod tavern;
