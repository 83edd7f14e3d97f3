//! Exam grading: correct answers add one point, wrong answers subtract a
//! third, blanks neither add nor subtract. Scaled to 0..=10.

/// Computes the 0..=10 grade for a finished exam, rounded to two decimals.
///
/// `total` counts every question in the session, answered or not. Returns 0
/// when the total is zero.
#[must_use]
pub fn exam_grade(total: u32, correct: u32, incorrect: u32) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let points = f64::from(correct) - f64::from(incorrect) / 3.0;
    let grade = (points / f64::from(total)) * 10.0;
    (grade.clamp(0.0, 10.0) * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perfect_exam_scores_ten() {
        assert_eq!(exam_grade(10, 10, 0), 10.0);
    }

    #[test]
    fn wrong_answers_subtract_a_third() {
        // 6 - 3/3 = 5 points over 10 questions.
        assert_eq!(exam_grade(10, 6, 3), 5.0);
    }

    #[test]
    fn blanks_do_not_subtract() {
        assert_eq!(exam_grade(10, 5, 0), 5.0);
    }

    #[test]
    fn grade_never_goes_negative() {
        assert_eq!(exam_grade(3, 0, 3), 0.0);
    }

    #[test]
    fn empty_exam_scores_zero() {
        assert_eq!(exam_grade(0, 0, 0), 0.0);
    }

    #[test]
    fn grade_rounds_to_two_decimals() {
        // 1 - 1/3 over 2 questions = 3.333... -> 3.33
        assert_eq!(exam_grade(2, 1, 1), 3.33);
    }
}
