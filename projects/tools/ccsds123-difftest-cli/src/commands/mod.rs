pub mod compare;
pub mod fuzz;
pub mod gen_cube;
pub mod gen_impl_params;
pub mod gen_sim_ref;
