pub mod theme_generator;
