use std::error::Error;

const GENRES: [&str; 10] = [
    "Drama", "Crime", "Action", "Comedy", "Adventure", "Thriller", "Romance", "Sci-Fi",
    "Animation", "Western",
];

const FIRST_NAMES: [&str; 12] = [
    "Al", "Diane", "Keanu", "Meryl", "Tom", "Scarlett", "Denzel", "Cate", "Robert", "Viola",
    "Marlon", "Frances",
];

const LAST_NAMES: [&str; 12] = [
    "Pacino", "Keaton", "Reeves", "Streep", "Hanks", "Johansson", "Washington", "Blanchett",
    "De Niro", "Davis", "Brando", "McDormand",
];

const TITLE_WORDS: [&str; 16] = [
    "Midnight", "Empire", "River", "Silent", "Last", "Golden", "Shadow", "City", "Dream",
    "Storm", "Return", "Garden", "Iron", "Secret", "Winter", "Road",
];

const CERTIFICATES: [&str; 4] = ["U", "UA", "A", "PG-13"];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next_u64() % n as u64) as usize
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[self.below(items.len())]
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// `1234567` → `"1,234,567"`, the way the source data spells gross.
fn with_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn main() -> Result<(), Box<dyn Error>> {
    let mut rng = SimpleRng::new(42);
    let output_path = "movies.csv";
    let mut writer = csv::Writer::from_path(output_path)?;

    writer.write_record([
        "Series_Title",
        "Released_Year",
        "Certificate",
        "Genre",
        "IMDB_Rating",
        "Meta_score",
        "Director",
        "Star1",
        "Star2",
        "Star3",
        "Star4",
        "No_of_Votes",
        "Gross",
    ])?;

    let n_movies = 250;
    for i in 0..n_movies {
        let title = format!(
            "{} {}",
            rng.pick(&TITLE_WORDS),
            rng.pick(&TITLE_WORDS)
        );

        let mut genres: Vec<&str> = Vec::new();
        for _ in 0..1 + rng.below(3) {
            let g = rng.pick(&GENRES);
            if !genres.contains(&g) {
                genres.push(g);
            }
        }

        let rating = rng.gauss(7.6, 0.8).clamp(3.0, 9.8);
        let meta_score = (rating * 10.0 + rng.gauss(0.0, 8.0)).clamp(20.0, 100.0);
        let votes = (rng.gauss(12.0, 1.2).exp()) as u64;
        let gross = (votes as f64 * rng.gauss(150.0, 60.0).max(5.0)) as u64;

        let mut person = || format!("{} {}", rng.pick(&FIRST_NAMES), rng.pick(&LAST_NAMES));
        let director = person();
        let stars = [person(), person(), person(), person()];

        // Sprinkle in the kinds of dirt real exports carry.
        let year = if i % 97 == 13 {
            "PG".to_string()
        } else {
            (1930 + rng.below(94)).to_string()
        };
        let gross_text = if i % 23 == 5 {
            String::new()
        } else {
            with_thousands(gross)
        };
        let meta_text = if i % 11 == 3 {
            String::new()
        } else {
            format!("{meta_score:.0}")
        };

        writer.write_record([
            title.as_str(),
            year.as_str(),
            rng.pick(&CERTIFICATES),
            genres.join("|").as_str(),
            format!("{rating:.1}").as_str(),
            meta_text.as_str(),
            director.as_str(),
            stars[0].as_str(),
            stars[1].as_str(),
            stars[2].as_str(),
            stars[3].as_str(),
            votes.to_string().as_str(),
            gross_text.as_str(),
        ])?;
    }

    writer.flush()?;
    println!("Wrote {n_movies} movies to {output_path}");
    Ok(())
}
