mod extract_tests;
mod heuristics_tests;
