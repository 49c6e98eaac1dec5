use skinsift_core::{ClassificationResult, ImageAnalyzer, IngestFile};

const SAMPLE_SIZE: u64 = 64 * 1024;

/// Stand-in content analyzer scoring files by the Shannon entropy of a
/// leading sample. Dense, photograph-like data lands high; flat or sparse
/// data falls below the floor and produces no finding.
pub struct EntropyAnalyzer {
    min_score: u8,
}

impl EntropyAnalyzer {
    pub fn new(min_score: u8) -> Self {
        Self { min_score }
    }
}

impl Default for EntropyAnalyzer {
    fn default() -> Self {
        Self::new(40)
    }
}

impl ImageAnalyzer for EntropyAnalyzer {
    fn scan(&self, file: &dyn IngestFile) -> Option<ClassificationResult> {
        let want = usize::try_from(file.size().min(SAMPLE_SIZE)).ok()?;
        if want == 0 {
            return None;
        }
        let mut buf = vec![0u8; want];
        let read = file.read(&mut buf, 0).ok()?;
        if read == 0 {
            return None;
        }

        let entropy = compute_entropy(&buf[..read]);
        let score = score_from_entropy(entropy);
        if score < self.min_score {
            return None;
        }
        Some(ClassificationResult {
            summary: format!("{entropy:.2} bits/byte over a {read} byte sample"),
            score,
        })
    }
}

fn score_from_entropy(entropy: f64) -> u8 {
    ((entropy / 8.0) * 100.0).clamp(0.0, 100.0).round() as u8
}

fn compute_entropy(data: &[u8]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let mut counts = [0u64; 256];
    for &byte in data {
        counts[byte as usize] += 1;
    }
    let len = data.len() as f64;
    let mut entropy = 0.0;
    for &count in &counts {
        if count > 0 {
            let p = count as f64 / len;
            entropy -= p * p.log2();
        }
    }
    entropy
}
