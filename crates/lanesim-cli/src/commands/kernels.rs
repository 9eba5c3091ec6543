use lanesim::kernels::{CLAMP_CEILING, EXP_MAX, KernelKind};
use lanesim::vector::VECTOR_WIDTH;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    println!("Vector width: {VECTOR_WIDTH}");
    println!("Exponent range: [0, {EXP_MAX})");
    println!("Clamp ceiling: {CLAMP_CEILING}");
    println!();
    for kind in KernelKind::ALL {
        println!("  {:<12} {}", kind.name(), kind.description());
    }
    Ok(())
}
