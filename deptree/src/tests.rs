use lazy_static::lazy_static;

use crate::sentence::Sentence;
use crate::token::Token;

fn token(line: &str) -> Token {
    line.split('\t').collect()
}

lazy_static! {
    pub static ref TEST_SENTENCES: Vec<Sentence> = {
        let mut sentences = Vec::new();

        let mut s1 = Sentence::new();
        s1.comments_mut().push(" sent_id = 1".to_owned());
        s1.push(token("1\tDie\tdie\tART\tART\tcase=nominative\t2\tDET\t_\t_"));
        s1.push(token("2\tGroßaufnahme\tGroßaufnahme\tN\tNN\tcase=nominative\t0\tROOT\t_\t_"));
        sentences.push(s1);

        let mut s2 = Sentence::new();
        s2.push(token("1\tGilles\tGilles\tN\tNE\t_\t0\tROOT\t_\t_"));
        s2.push(token("2\tDeleuze\tDeleuze\tN\tNE\t_\t1\tAPP\t_\t_"));
        s2.push(token("3\tschreibt\tschreiben\tV\tVVFIN\t_\t4\tMOD\t_\t_"));
        s2.push(token("4\tviel\tviel\tADV\tADV\t_\t1\tADV\t_\t_"));
        sentences.push(s2);

        sentences
    };
}
