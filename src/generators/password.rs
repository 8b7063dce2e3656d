// src/generators/password.rs
use std::thread;
use crate::crypto::{self, OsRng, SecureRng};
use crate::generators::policy::ResolvedPolicy;
use crate::models::GeneratedPassword;

/// Draws passwords that satisfy a [`ResolvedPolicy`].
///
/// Stateless: all randomness comes from the generator handed to each call.
/// Resolution already proved the policy is satisfiable, so nothing here
/// can fail.
#[derive(Debug, Default, Clone, Copy)]
pub struct PasswordGenerator;

impl PasswordGenerator {
    pub fn new() -> Self {
        PasswordGenerator
    }

    /// Draw a single password.
    pub fn generate_one<R: SecureRng>(&self, policy: &ResolvedPolicy, rng: &mut R) -> GeneratedPassword {
        let length = policy.length();
        let mut chars = Vec::with_capacity(length);

        if policy.require_each_selected_class() {
            // One guaranteed slot per selected class, then filler from the pool
            for alphabet in policy.alphabets() {
                chars.push(crypto::pick(rng, alphabet.chars()));
            }
            while chars.len() < length {
                chars.push(crypto::pick(rng, policy.pool()));
            }
            crypto::secure_shuffle(rng, &mut chars);
        } else {
            for _ in 0..length {
                chars.push(crypto::pick(rng, policy.pool()));
            }
        }

        GeneratedPassword::from_chars(chars)
    }

    /// Lazily draw exactly `count` passwords. Dropping the iterator early
    /// simply stops drawing.
    pub fn iter<'a, R: SecureRng>(&'a self, policy: &'a ResolvedPolicy, count: usize, rng: &'a mut R) -> Draws<'a, R> {
        Draws {
            generator: self,
            policy,
            rng,
            remaining: count,
        }
    }

    /// Draw exactly `count` passwords.
    pub fn generate<R: SecureRng>(&self, policy: &ResolvedPolicy, count: usize, rng: &mut R) -> Vec<GeneratedPassword> {
        self.iter(policy, count, rng).collect()
    }

    /// Draw the batch size recorded in the policy from the OS generator.
    pub fn generate_batch(&self, policy: &ResolvedPolicy) -> Vec<GeneratedPassword> {
        self.generate(policy, policy.count(), &mut OsRng)
    }

    /// Split a batch across `workers` scoped threads, each with its own
    /// thread-local CSPRNG. Output order carries no meaning.
    pub fn generate_parallel(&self, policy: &ResolvedPolicy, count: usize, workers: usize) -> Vec<GeneratedPassword> {
        let workers = workers.clamp(1, count.max(1));
        if workers == 1 {
            return self.generate(policy, count, &mut OsRng);
        }

        log::debug!("Generating {} passwords on {} workers", count, workers);

        let base = count / workers;
        let extra = count % workers;

        thread::scope(|scope| {
            let handles: Vec<_> = (0..workers)
                .map(|worker| {
                    let share = base + usize::from(worker < extra);
                    scope.spawn(move || {
                        let mut rng = rand::thread_rng();
                        self.generate(policy, share, &mut rng)
                    })
                })
                .collect();

            let mut passwords = Vec::with_capacity(count);
            for handle in handles {
                match handle.join() {
                    Ok(batch) => passwords.extend(batch),
                    Err(panic) => std::panic::resume_unwind(panic),
                }
            }
            passwords
        })
    }
}

/// Iterator returned by [`PasswordGenerator::iter`].
pub struct Draws<'a, R> {
    generator: &'a PasswordGenerator,
    policy: &'a ResolvedPolicy,
    rng: &'a mut R,
    remaining: usize,
}

impl<'a, R: SecureRng> Iterator for Draws<'a, R> {
    type Item = GeneratedPassword;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        Some(self.generator.generate_one(self.policy, &mut *self.rng))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, R: SecureRng> ExactSizeIterator for Draws<'a, R> {}
