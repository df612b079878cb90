pub mod board_io;
pub mod recovery;
