use scoring::Criterion;

pub fn run() {
    println!("{:<45} {:>4}", "Criterion", "Max");
    for criterion in Criterion::ALL {
        println!("{:<45} {:>4}", criterion.label(), criterion.max_points());
    }
    println!("{:<45} {:>4}", "Total", Criterion::total_max_points());
}
