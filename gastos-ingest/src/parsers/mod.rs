pub mod c6_csv;
