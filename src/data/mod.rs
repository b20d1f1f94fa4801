pub mod contour;
pub mod export;
pub mod lissajous;
pub mod minimizer;
pub mod parameter;
pub mod plot_view;
pub mod rosenbrock;
pub mod samples;
pub mod trace;
pub mod van_der_pol;
