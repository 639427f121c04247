//! Tests for the Assassin game engine

#![cfg(test)]
