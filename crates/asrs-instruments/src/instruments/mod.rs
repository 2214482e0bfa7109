pub mod asrs_v11;
