use rand::seq::SliceRandom;
use rand::Rng;
use std::time::{Duration, Instant};

/// Banner spelled out by text particles when a block completes
pub const BANNER: &str = "GOAL +1";

const BURST_SYMBOLS: [char; 6] = ['✦', '✧', '★', '☆', '•', '✶'];

/// Fixed step matching the frame cadence
const STEP_SECS: f64 = 0.05;

#[derive(Debug, Clone)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub vel_x: f64,
    pub vel_y: f64,
    pub symbol: char,
    pub color_index: usize,
    pub age: f64,
    pub max_age: f64,
    /// Banner letters glide to a fixed slot instead of falling
    pub target: Option<(f64, f64)>,
}

impl Particle {
    fn spark<R: Rng>(x: f64, y: f64, rng: &mut R) -> Self {
        Self {
            x,
            y,
            vel_x: rng.gen_range(-3.0..3.0),
            vel_y: rng.gen_range(-4.0..-1.0), // always upward at first
            symbol: *BURST_SYMBOLS.choose(rng).unwrap_or(&'✦'),
            color_index: rng.gen_range(0..7),
            age: 0.0,
            max_age: rng.gen_range(1.5..3.0), // sparks burn out before the banner
            target: None,
        }
    }

    fn letter<R: Rng>(from: (f64, f64), to: (f64, f64), symbol: char, rng: &mut R) -> Self {
        Self {
            x: from.0,
            y: from.1,
            // velocity points straight at the slot
            vel_x: to.0 - from.0,
            vel_y: to.1 - from.1,
            symbol,
            color_index: rng.gen_range(0..7),
            age: 0.0,
            max_age: 3.0, // outlives the celebration, so letters never fade early
            target: Some(to),
        }
    }

    pub fn is_letter(&self) -> bool {
        self.target.is_some()
    }

    fn update(&mut self, dt: f64) -> bool {
        match self.target {
            Some((tx, ty)) => {
                let dist = ((tx - self.x).powi(2) + (ty - self.y).powi(2)).sqrt();
                // cover the remaining distance at a rate proportional to it,
                // which eases the letter into place
                if dist > 0.5 {
                    self.x += self.vel_x * dt * 2.0;
                    self.y += self.vel_y * dt * 2.0;
                    self.vel_x = tx - self.x;
                    self.vel_y = ty - self.y;
                } else {
                    // close enough: snap and hold
                    self.x = tx;
                    self.y = ty;
                }
            }
            None => {
                self.x += self.vel_x * dt;
                self.y += self.vel_y * dt;
                self.vel_y += 12.0 * dt; // gravity, in rows per second squared
            }
        }

        self.age += dt;
        self.age < self.max_age
    }
}

/// Particle burst shown over the timer when a block of rounds completes
#[derive(Debug)]
pub struct Celebration {
    pub particles: Vec<Particle>,
    pub started_at: Option<Instant>,
    pub duration: Duration,
    width: f64,
    height: f64,
}

impl Celebration {
    pub fn new() -> Self {
        Self {
            particles: Vec::new(),
            started_at: None,
            duration: Duration::from_secs(3),
            // replaced by the real viewport on start
            width: 80.0,
            height: 24.0,
        }
    }

    pub fn is_active(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn start(&mut self, width: u16, height: u16, now: Instant) {
        let mut rng = rand::thread_rng();

        self.particles.clear();
        self.started_at = Some(now);
        self.width = width as f64;
        self.height = height as f64;

        let cx = self.width / 2.0;
        let cy = self.height / 2.0;

        let spacing = 2.0; // columns between banner letters
        let left = cx - (BANNER.chars().count() as f64 - 1.0) * spacing / 2.0;
        for (i, ch) in BANNER.chars().enumerate().filter(|(_, c)| *c != ' ') {
            let from = (cx + rng.gen_range(-10.0..10.0), cy + rng.gen_range(-5.0..5.0));
            // banner sits a few rows above the cards
            let to = (left + i as f64 * spacing, cy - 4.0);
            self.particles.push(Particle::letter(from, to, ch, &mut rng));
        }

        // decorative sparks scattered around the centre
        for _ in 0..30 {
            let x = cx + rng.gen_range(-15.0..15.0);
            let y = cy + rng.gen_range(-6.0..6.0);
            self.particles.push(Particle::spark(x, y, &mut rng));
        }
    }

    pub fn update(&mut self, now: Instant) {
        let Some(started_at) = self.started_at else {
            return;
        };

        if now.saturating_duration_since(started_at) >= self.duration {
            self.stop();
            return;
        }

        // one fixed step per frame; a stalled frame slows the burst rather than skipping it
        let (width, height) = (self.width, self.height);
        self.particles.retain_mut(|p| {
            let alive = p.update(STEP_SECS);
            let margin = 4.0;
            // letters are never culled, only sparks that leave the screen
            let off_screen = !p.is_letter()
                && (p.y > height + margin || p.x < -margin || p.x > width + margin);
            alive && !off_screen
        });
    }

    pub fn stop(&mut self) {
        self.started_at = None;
        self.particles.clear();
    }
}

impl Default for Celebration {
    fn default() -> Self {
        Self::new()
    }
}
