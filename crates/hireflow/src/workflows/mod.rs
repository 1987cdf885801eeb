pub mod interviews;
