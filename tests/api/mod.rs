mod gun_tests;
mod health_tests;
