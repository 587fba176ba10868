pub mod bessel;
