pub mod welch;
