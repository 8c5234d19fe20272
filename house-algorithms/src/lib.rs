pub mod house_assignment;
