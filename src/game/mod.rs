// Game modules: the player locomotion-and-combat core

pub mod player;
